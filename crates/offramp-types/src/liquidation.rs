//! Liquidation addresses and settlement rails.
//!
//! A liquidation address is a partner-issued deposit address bound to a
//! (chain, currency, external account) triple. The partner treats each
//! address as a distinct ledger entry, so the triple is a natural key:
//! the registry must never create two addresses for the same triple.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountKind, ExternalAccountId, LiquidationAddressId};

/// The bank transfer network a settlement rides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rail {
    Sepa,
    Ach,
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sepa => write!(f, "sepa"),
            Self::Ach => write!(f, "ach"),
        }
    }
}

/// The fiat currency delivered to the bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementCurrency {
    Eur,
    Usd,
}

impl fmt::Display for SettlementCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eur => write!(f, "eur"),
            Self::Usd => write!(f, "usd"),
        }
    }
}

/// Map an account kind to its settlement rail and fiat currency:
/// IBAN accounts settle over SEPA in EUR, everything else over ACH in USD.
#[must_use]
pub fn rail_for(kind: AccountKind) -> (Rail, SettlementCurrency) {
    match kind {
        AccountKind::Iban => (Rail::Sepa, SettlementCurrency::Eur),
        AccountKind::Ach => (Rail::Ach, SettlementCurrency::Usd),
    }
}

/// A partner-issued deposit address. Owned by the partner; the core only
/// references it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationAddress {
    pub id: LiquidationAddressId,
    /// The on-chain deposit address funds are claimed to.
    pub address: String,
    /// Partner chain name (e.g. `"optimism"`).
    pub chain: String,
    /// Partner currency name (e.g. `"usdc"`).
    pub currency: String,
    /// The external bank account this address pays out to.
    pub external_account_id: ExternalAccountId,
}

impl LiquidationAddress {
    /// Exact natural-key match on (chain, currency, external account).
    #[must_use]
    pub fn matches(&self, chain: &str, currency: &str, external_account_id: &ExternalAccountId) -> bool {
        self.chain == chain && self.currency == currency && self.external_account_id == *external_account_id
    }
}
