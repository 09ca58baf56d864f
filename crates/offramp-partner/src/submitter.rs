//! Settlement submission to the banking partner's ledger.
//!
//! Runs after the on-chain claim, so a failure here must never trigger a
//! re-claim. The partner deduplicates on (link, transaction hash), which
//! makes this single call safe to retry as-is.

use std::sync::Arc;

use tracing::{error, info};

use offramp_types::{OfframpError, Result, SettlementRecord};

use crate::client::PartnerApi;

/// Reports completed settlements to the banking partner.
pub struct SettlementSubmitter {
    partner: Arc<dyn PartnerApi>,
}

impl SettlementSubmitter {
    #[must_use]
    pub fn new(partner: Arc<dyn PartnerApi>) -> Self {
        Self { partner }
    }

    /// Submit a finalized settlement record.
    ///
    /// # Errors
    /// Returns [`OfframpError::Submission`]; the caller keeps the transaction
    /// hash for manual reconciliation.
    pub async fn submit(&self, record: &SettlementRecord) -> Result<()> {
        let digest = record.digest();
        match self.partner.submit_settlement(record).await {
            Ok(()) => {
                info!(
                    link = %record.link,
                    tx = %record.transaction_hash,
                    digest = %digest,
                    "settlement recorded with partner"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    link = %record.link,
                    tx = %record.transaction_hash,
                    digest = %digest,
                    "settlement submission failed: {e}"
                );
                Err(OfframpError::Submission {
                    reason: e.to_string(),
                })
            }
        }
    }
}
