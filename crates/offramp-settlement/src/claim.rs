//! On-chain link claiming.
//!
//! Claiming consumes the link — it is the one irrevocable step of the
//! workflow. The executor makes exactly one claim call per invocation:
//! cross-chain when the route says bridging is required, direct otherwise.
//! On failure the link remains unclaimed and the holder can still redeem it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use offramp_types::{
    ChainId, ClaimLink, OfframpError, PaymentLink, Result, SettlementRoute, TokenAddress, TxHash,
};

/// Client for the on-chain claim service.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Snapshot of a funded link.
    async fn link_details(&self, link: &ClaimLink) -> Result<PaymentLink>;

    /// Version of the escrow contract on the given chain.
    async fn latest_contract_version(&self, chain_id: &ChainId) -> Result<String>;

    /// Claim the link to `address` on the link's own chain.
    async fn claim_direct(&self, address: &str, link: &ClaimLink) -> Result<TxHash>;

    /// Claim the link cross-chain, delivering `dest_token` on
    /// `dest_chain_id` to `address`.
    async fn claim_cross_chain(
        &self,
        address: &str,
        link: &ClaimLink,
        dest_chain_id: &ChainId,
        dest_token: &TokenAddress,
    ) -> Result<TxHash>;
}

/// Executes the on-chain claim for a resolved route.
pub struct LinkClaimExecutor {
    chain: Arc<dyn ChainClient>,
}

impl LinkClaimExecutor {
    #[must_use]
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Claim `link` to `address` along `route`. Exactly one on-chain call.
    ///
    /// # Errors
    /// Returns [`OfframpError::ClaimExecution`]; the link was not consumed.
    pub async fn claim(
        &self,
        route: &SettlementRoute,
        address: &str,
        link: &ClaimLink,
    ) -> Result<TxHash> {
        let result = match route {
            SettlementRoute::Bridged {
                dest_chain_id,
                dest_token,
                ..
            } => {
                self.chain
                    .claim_cross_chain(address, link, dest_chain_id, dest_token)
                    .await
            }
            SettlementRoute::Direct { .. } => self.chain.claim_direct(address, link).await,
        };
        match result {
            Ok(tx) => {
                info!(%link, %tx, bridged = route.bridging_required(), "link claimed");
                Ok(tx)
            }
            Err(e) => Err(OfframpError::ClaimExecution {
                reason: e.to_string(),
            }),
        }
    }
}
