//! Bridging venue client boundary.
//!
//! The venue answers two questions: which chains can funds on the source
//! chain be bridged to, and what is the concrete path for a given
//! (source, destination) pair. The venue owns its routing algorithm; the
//! core only checks eligibility and asks for the fixed fallback path.

use async_trait::async_trait;

use offramp_types::{ChainId, ChainOption, BridgeRoute, Result, RouteRequest, TokenType};

/// Client for the cross-chain bridging venue.
#[async_trait]
pub trait BridgingVenue: Send + Sync {
    /// Candidate destination chains for funds on `source_chain_id`.
    async fn chain_options(
        &self,
        source_chain_id: &ChainId,
        token_type: TokenType,
        is_testnet: bool,
    ) -> Result<Vec<ChainOption>>;

    /// Compute a concrete bridging path, or `None` when the venue cannot
    /// route the pair.
    async fn compute_route(&self, request: &RouteRequest) -> Result<Option<BridgeRoute>>;
}

/// Filter venue candidates down to eligible bridging targets: Ethereum
/// mainnet is excluded by policy, and bridging back to the source chain is
/// meaningless. Output is sorted by chain id so eligibility decisions do not
/// depend on venue response ordering.
#[must_use]
pub fn eligible_options(mut options: Vec<ChainOption>, source_chain_id: &ChainId) -> Vec<ChainOption> {
    options.retain(|opt| {
        opt.chain_id.as_str() != offramp_types::constants::EXCLUDED_BRIDGE_CHAIN_ID
            && opt.chain_id != *source_chain_id
    });
    options.sort_by(|a, b| a.chain_id.cmp(&b.chain_id));
    options
}
