//! Claim link model.
//!
//! A claim link references escrowed token funds that can be redeemed exactly
//! once. `PaymentLink` is the on-chain snapshot of a link's funding, fetched
//! from the claim service before settlement and immutable thereafter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ChainId, TokenAddress};

/// The shareable link identifier itself. Opaque to the core; only the claim
/// service interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimLink(pub String);

impl ClaimLink {
    #[must_use]
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the escrowed asset is the chain's native currency or a token
/// contract. The bridging venue needs this distinction when listing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Native,
    Erc20,
}

/// Sentinel addresses some wallets use for the native currency.
const NATIVE_SENTINELS: [&str; 2] = [
    "0x0000000000000000000000000000000000000000",
    "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
];

impl TokenType {
    /// Classify a token address: the zero address and the `0xeeee…` sentinel
    /// denote native currency, anything else is a token contract.
    #[must_use]
    pub fn of(address: &TokenAddress) -> Self {
        if NATIVE_SENTINELS.contains(&address.as_str()) {
            Self::Native
        } else {
            Self::Erc20
        }
    }
}

/// Immutable snapshot of a funded claim link, as reported by the on-chain
/// claim service. Read by the route resolver and the claim executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    /// The shareable link identifier.
    pub link: ClaimLink,
    /// Chain the funds are escrowed on.
    pub chain_id: ChainId,
    /// Token contract (or native sentinel) of the escrowed asset.
    pub token_address: TokenAddress,
    /// Escrowed amount in human units, as the chain service reports it.
    pub token_amount: String,
    /// Decimals of the escrowed token.
    pub token_decimals: u8,
    /// Address that funded the link.
    pub sender_address: String,
}

impl PaymentLink {
    /// Token type of the escrowed asset.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        TokenType::of(&self.token_address)
    }
}
