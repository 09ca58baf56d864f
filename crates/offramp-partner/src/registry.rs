//! Liquidation address registry — idempotent resolve-or-create.
//!
//! The partner treats every liquidation address as a distinct ledger entry,
//! so the (chain, currency, external account) triple must never get two
//! addresses. The registry queries first and only creates on a verified
//! miss; creation is not retried — a failure leaves no partial state.

use std::sync::Arc;

use tracing::{debug, info};

use offramp_types::{
    AccountKind, CustomerId, ExternalAccountId, LiquidationAddress, OfframpError, Result,
    rail_for,
};

use crate::client::{CreateLiquidationAddress, PartnerApi};

/// Resolves or provisions the partner deposit address for a settlement
/// destination.
pub struct LiquidationAddressRegistry {
    partner: Arc<dyn PartnerApi>,
}

impl LiquidationAddressRegistry {
    #[must_use]
    pub fn new(partner: Arc<dyn PartnerApi>) -> Self {
        Self { partner }
    }

    /// Return the existing liquidation address for
    /// (`chain`, `currency`, `external_account_id`), creating one only if
    /// none exists. Atomic from the caller's perspective; internally an
    /// idempotent query plus a guarded create.
    ///
    /// # Errors
    /// Returns [`OfframpError::AddressProvisioning`] when the partner cannot
    /// list or create the address.
    pub async fn resolve_or_create(
        &self,
        customer_id: &CustomerId,
        chain: &str,
        currency: &str,
        external_account_id: &ExternalAccountId,
        account_kind: AccountKind,
    ) -> Result<LiquidationAddress> {
        let existing = self
            .partner
            .list_liquidation_addresses(customer_id)
            .await
            .map_err(|e| OfframpError::AddressProvisioning {
                reason: format!("listing failed: {e}"),
            })?;

        if let Some(address) = existing
            .into_iter()
            .find(|a| a.matches(chain, currency, external_account_id))
        {
            debug!(id = %address.id, chain, currency, "reusing liquidation address");
            return Ok(address);
        }

        let (rail, settlement_currency) = rail_for(account_kind);
        let request = CreateLiquidationAddress {
            customer_id: customer_id.clone(),
            chain: chain.to_string(),
            currency: currency.to_string(),
            external_account_id: external_account_id.clone(),
            rail,
            settlement_currency,
        };
        let created = self
            .partner
            .create_liquidation_address(&request)
            .await
            .map_err(|e| OfframpError::AddressProvisioning {
                reason: format!("creation failed: {e}"),
            })?;

        info!(
            id = %created.id,
            chain,
            currency,
            rail = %rail,
            "provisioned liquidation address"
        );
        Ok(created)
    }
}
