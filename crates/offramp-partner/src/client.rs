//! Banking partner API boundary.
//!
//! The partner owns customers, external bank accounts, liquidation
//! addresses, and the settlement ledger. The core only ever reads and
//! appends; nothing partner-side is mutated in place.

use async_trait::async_trait;

use offramp_types::{
    CustomerId, ExternalAccountId, LiquidationAddress, Rail, Result, SettlementCurrency,
    SettlementRecord,
};

/// Request to provision a new liquidation address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLiquidationAddress {
    pub customer_id: CustomerId,
    /// Partner chain name funds will arrive on.
    pub chain: String,
    /// Partner currency name of the arriving asset.
    pub currency: String,
    /// The bank account the address pays out to.
    pub external_account_id: ExternalAccountId,
    /// Transfer network for the payout.
    pub rail: Rail,
    /// Fiat currency delivered to the account.
    pub settlement_currency: SettlementCurrency,
}

/// Client for the banking partner's API.
#[async_trait]
pub trait PartnerApi: Send + Sync {
    /// All liquidation addresses bound to a customer.
    async fn list_liquidation_addresses(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<LiquidationAddress>>;

    /// Provision a new liquidation address.
    async fn create_liquidation_address(
        &self,
        request: &CreateLiquidationAddress,
    ) -> Result<LiquidationAddress>;

    /// Append a completed settlement to the partner's ledger. Idempotent on
    /// (link, transaction hash) partner-side.
    async fn submit_settlement(&self, record: &SettlementRecord) -> Result<()>;
}
