//! Configuration for the OffRamp engine.
//!
//! `PartnerAssetMap` is the table of (chain, token) pairs the banking partner
//! can receive directly, together with the partner's naming for each. The
//! `mainnet()` preset mirrors the partner's current support matrix; deployers
//! with a different matrix construct their own map.

use serde::{Deserialize, Serialize};

use crate::{ChainId, TokenAddress, constants};

/// One directly-supported (chain, token) pair and the partner's names for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerAsset {
    pub chain_id: ChainId,
    pub token_address: TokenAddress,
    /// Partner chain name (e.g. `"optimism"`).
    pub chain_name: String,
    /// Partner currency name (e.g. `"usdc"`).
    pub currency: String,
}

/// The partner's support matrix with lookups in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerAssetMap {
    assets: Vec<PartnerAsset>,
}

impl PartnerAssetMap {
    #[must_use]
    pub fn new(assets: Vec<PartnerAsset>) -> Self {
        Self { assets }
    }

    /// The partner's current mainnet support matrix.
    #[must_use]
    pub fn mainnet() -> Self {
        let entry = |chain_id: &str, token: &str, chain_name: &str, currency: &str| PartnerAsset {
            chain_id: ChainId::new(chain_id),
            token_address: TokenAddress::new(token),
            chain_name: chain_name.to_string(),
            currency: currency.to_string(),
        };
        Self::new(vec![
            // USDC
            entry("1", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "ethereum", "usdc"),
            entry("10", constants::USDC_ADDRESS_OPTIMISM, "optimism", "usdc"),
            entry("137", "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359", "polygon", "usdc"),
            entry("8453", "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913", "base", "usdc"),
            entry("42161", "0xaf88d065e77c8cc2239327c5edb3a432268e5831", "arbitrum", "usdc"),
            // USDT
            entry("1", "0xdac17f958d2ee523a2206206994597c13d831ec7", "ethereum", "usdt"),
        ])
    }

    /// Direct lookup: the partner's (chain name, currency) for a source
    /// (chain, token), or `None` if the partner cannot receive it directly.
    #[must_use]
    pub fn names_for(&self, chain_id: &ChainId, token: &TokenAddress) -> Option<(&str, &str)> {
        self.assets
            .iter()
            .find(|a| a.chain_id == *chain_id && a.token_address == *token)
            .map(|a| (a.chain_name.as_str(), a.currency.as_str()))
    }

    /// Reverse lookup: the chain id for a partner chain name.
    #[must_use]
    pub fn chain_id_for(&self, chain_name: &str) -> Option<&ChainId> {
        self.assets
            .iter()
            .find(|a| a.chain_name == chain_name)
            .map(|a| &a.chain_id)
    }

    /// Reverse lookup: the token address for a (chain id, currency) pair.
    #[must_use]
    pub fn token_address_for(&self, chain_id: &ChainId, currency: &str) -> Option<&TokenAddress> {
        self.assets
            .iter()
            .find(|a| a.chain_id == *chain_id && a.currency == currency)
            .map(|a| &a.token_address)
    }
}

/// Engine-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfframpConfig {
    /// Whether the source chains are testnets (forwarded to the venue).
    pub testnet: bool,
    /// Directory for the durable recovery store.
    pub recovery_dir: String,
    /// Age after which a recovery entry is considered stale.
    pub stale_after_secs: u64,
}

impl Default for OfframpConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            recovery_dir: ".offramp/recovery".to_string(),
            stale_after_secs: constants::DEFAULT_STALE_AFTER_SECS,
        }
    }
}
