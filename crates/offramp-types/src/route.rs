//! Settlement route model.
//!
//! A route describes how a claimed asset reaches the banking partner: either
//! the partner supports the source (chain, token) directly, or the claim must
//! be bridged to the fixed fallback asset first. Routes are computed per
//! attempt and never persisted.

use serde::{Deserialize, Serialize};

use crate::{ChainId, TokenAddress};

/// One cross-chain candidate returned by the bridging venue for a source
/// chain. Candidates are eligibility evidence only — the bridging target
/// itself is fixed by policy, not chosen from this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOption {
    /// Destination chain the venue can bridge to.
    pub chain_id: ChainId,
    /// Venue's display name for the chain.
    pub chain_name: String,
}

/// Parameters for computing a concrete bridging path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub source_token: TokenAddress,
    pub source_chain_id: ChainId,
    pub dest_token: TokenAddress,
    pub dest_chain_id: ChainId,
    pub token_decimals: u8,
    pub token_amount: String,
    pub sender_address: String,
}

/// A computed bridging path from the venue. Opaque to the core beyond the
/// estimated output; it is handed back to the claim service untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRoute {
    /// Venue-assigned identifier for this path.
    pub route_id: String,
    /// Estimated destination amount in human units.
    pub estimated_output: String,
}

/// The resolver's decision for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementRoute {
    /// The partner supports the source (chain, token) directly.
    Direct {
        /// Partner chain name (e.g. `"polygon"`).
        chain_name: String,
        /// Partner currency name (e.g. `"usdc"`).
        currency: String,
    },
    /// The claim must be bridged to the fallback asset before settlement.
    Bridged {
        /// Partner chain name of the fallback chain.
        chain_name: String,
        /// Partner currency name of the fallback asset.
        currency: String,
        /// Chain id the cross-chain claim targets.
        dest_chain_id: ChainId,
        /// Token the cross-chain claim delivers.
        dest_token: TokenAddress,
        /// The venue's computed path.
        route: BridgeRoute,
    },
}

impl SettlementRoute {
    /// Whether this route requires a cross-chain claim.
    #[must_use]
    pub fn bridging_required(&self) -> bool {
        matches!(self, Self::Bridged { .. })
    }

    /// Partner chain name of the settlement destination.
    #[must_use]
    pub fn chain_name(&self) -> &str {
        match self {
            Self::Direct { chain_name, .. } | Self::Bridged { chain_name, .. } => chain_name,
        }
    }

    /// Partner currency name of the settlement destination.
    #[must_use]
    pub fn currency(&self) -> &str {
        match self {
            Self::Direct { currency, .. } | Self::Bridged { currency, .. } => currency,
        }
    }
}
