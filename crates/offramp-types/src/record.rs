//! The settlement record — the final artifact of a cash-out attempt.
//!
//! Created once after a successful claim, submitted once to the banking
//! partner, never mutated. The record's digest is logged at submission so
//! the partner-side ledger entry can be matched against our logs during
//! reconciliation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{ChainId, ClaimLink, CustomerId, ExternalAccountId, LiquidationAddressId, TxHash};

/// Everything the banking partner needs to tie an on-chain claim to a fiat
/// payout. The partner deduplicates on (link, transaction hash), so
/// resubmitting the same record is safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// The claimed link.
    pub link: ClaimLink,
    /// Hash of the claim transaction.
    pub transaction_hash: TxHash,
    /// The liquidation address the funds were claimed to.
    pub liquidation_address_id: LiquidationAddressId,
    /// The partner customer the settlement belongs to.
    pub customer_id: CustomerId,
    /// The bank account the payout targets.
    pub external_account_id: ExternalAccountId,
    /// Chain the funds arrived on (post-bridging if a bridge was used).
    pub destination_chain_id: ChainId,
    /// Partner currency name of the settled asset.
    pub destination_currency: String,
    /// USD value of the claim at settlement time.
    pub usd_value: Decimal,
    /// Flat fee charged for the transfer, in USD.
    pub fee: Decimal,
    /// When the record was assembled.
    pub recorded_at: DateTime<Utc>,
}

impl SettlementRecord {
    /// Hex-encoded SHA-256 over the record's canonical JSON form.
    ///
    /// Serde struct serialization preserves field order, so equal records
    /// produce equal digests.
    #[must_use]
    pub fn digest(&self) -> String {
        let payload = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(b"offramp:settlement_record:v1:");
        hasher.update(&payload);
        hex::encode(hasher.finalize())
    }
}
