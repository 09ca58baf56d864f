//! Cash-out workflow orchestration.
//!
//! One `settle` call runs the whole pipeline for a single attempt:
//!
//! ```text
//! resolve route → resolve/provision address → recovery write
//!     → on-chain claim → recovery clear → partner submission
//! ```
//!
//! Every arrow is a hard sequence point — no step starts before its
//! predecessor returned. There is no internal retry and no speculative
//! parallelism: each step depends on the previous step's resolved values,
//! and the claim must never race the address resolution it pays out to.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use offramp_partner::{LiquidationAddressRegistry, PartnerApi, SettlementSubmitter, fees};
use offramp_routing::{BridgingVenue, RouteResolver};
use offramp_types::{
    AttemptId, ClaimLink, FailureKind, OfframpError, PartnerAssetMap, Result, SettlementRecord,
    SettlementRoute, TxHash, UserContext, WorkflowStatus,
};

use crate::claim::{ChainClient, LinkClaimExecutor};
use crate::recovery::{RecoveryLedger, RecoveryStore};

/// Successful outcome of one attempt.
#[derive(Debug, Clone)]
pub struct CashoutReceipt {
    /// The record submitted to the partner.
    pub record: SettlementRecord,
    /// Hash of the claim transaction.
    pub transaction_hash: TxHash,
    /// Net USD amount the user receives after the flat fee.
    pub total_received: Decimal,
}

/// Terminal failure state of one attempt, kept for display and recovery.
#[derive(Debug, Clone)]
pub struct FailureReport {
    pub kind: FailureKind,
    /// The failed step's error message.
    pub message: String,
    /// The link this attempt was settling. When the failure preceded the
    /// claim, the link is still redeemable by its holder.
    pub link: ClaimLink,
    /// Set when the claim had already succeeded before the failing step.
    pub transaction_hash: Option<TxHash>,
}

impl FailureReport {
    /// Whether the reclaim escape hatch applies: the claim transaction went
    /// through, so the user's funds are on-chain at the liquidation address
    /// even though the bank-side record is incomplete. The hash makes manual
    /// reconciliation possible.
    #[must_use]
    pub fn reclaim_available(&self) -> bool {
        self.transaction_hash.is_some()
    }
}

/// Sequences one cash-out attempt end to end.
///
/// Holds the status machine for the attempt. `settle` takes `&mut self`, so
/// one orchestrator cannot run two attempts at once; callers must also not
/// start a second attempt for the *same link* elsewhere while one is
/// outstanding (disable the triggering action until `settle` returns).
pub struct WorkflowOrchestrator {
    resolver: RouteResolver,
    registry: LiquidationAddressRegistry,
    executor: LinkClaimExecutor,
    submitter: SettlementSubmitter,
    ledger: RecoveryLedger,
    chain: Arc<dyn ChainClient>,
    status: WorkflowStatus,
    failure: Option<FailureReport>,
}

impl WorkflowOrchestrator {
    #[must_use]
    pub fn new(
        assets: PartnerAssetMap,
        testnet: bool,
        venue: Arc<dyn BridgingVenue>,
        partner: Arc<dyn PartnerApi>,
        chain: Arc<dyn ChainClient>,
        store: Box<dyn RecoveryStore>,
    ) -> Self {
        Self {
            resolver: RouteResolver::new(assets, venue, testnet),
            registry: LiquidationAddressRegistry::new(partner.clone()),
            executor: LinkClaimExecutor::new(chain.clone()),
            submitter: SettlementSubmitter::new(partner),
            ledger: RecoveryLedger::new(store),
            chain,
            status: WorkflowStatus::Idle,
            failure: None,
        }
    }

    /// Current status of the attempt.
    #[must_use]
    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Failure state of the last attempt, if it failed.
    #[must_use]
    pub fn failure(&self) -> Option<&FailureReport> {
        self.failure.as_ref()
    }

    /// The recovery ledger, for out-of-band reconciliation tooling.
    #[must_use]
    pub fn ledger(&self) -> &RecoveryLedger {
        &self.ledger
    }

    /// Settle `link` to the bank account matching `recipient`.
    ///
    /// `usd_value` is the link's USD value at settlement time, as priced by
    /// the caller. A failed attempt is re-run by calling `settle` again; no
    /// step is retried internally.
    ///
    /// # Errors
    /// Any step's error, after recording it in the failure report. The
    /// report carries the claim transaction hash when one was obtained.
    pub async fn settle(
        &mut self,
        link: &ClaimLink,
        user: &UserContext,
        recipient: &str,
        usd_value: Decimal,
    ) -> Result<CashoutReceipt> {
        self.failure = None;
        let mut claim_tx = None;
        match self.run(link, user, recipient, usd_value, &mut claim_tx).await {
            Ok(receipt) => {
                self.phase(WorkflowStatus::Done);
                Ok(receipt)
            }
            Err(e) => {
                let kind = e.kind();
                self.status = WorkflowStatus::Failed(kind);
                error!(%link, %kind, tx = ?claim_tx, "cash-out attempt failed: {e}");
                self.failure = Some(FailureReport {
                    kind,
                    message: e.to_string(),
                    link: link.clone(),
                    transaction_hash: claim_tx,
                });
                Err(e)
            }
        }
    }

    async fn run(
        &mut self,
        link: &ClaimLink,
        user: &UserContext,
        recipient: &str,
        usd_value: Decimal,
        claim_tx: &mut Option<TxHash>,
    ) -> Result<CashoutReceipt> {
        self.phase(WorkflowStatus::ResolvingRoute);

        if user.customer_id.0.is_empty() {
            return Err(OfframpError::MissingContext {
                reason: "partner customer id not set".into(),
            });
        }
        let account = user
            .find_account(recipient)
            .ok_or(OfframpError::AccountNotFound)?
            .clone();

        let details = self
            .chain
            .link_details(link)
            .await
            .map_err(|e| OfframpError::LinkInspection {
                reason: e.to_string(),
            })?;
        let contract_version = self
            .chain
            .latest_contract_version(&details.chain_id)
            .await
            .map_err(|e| OfframpError::LinkInspection {
                reason: e.to_string(),
            })?;
        let route = self.resolver.resolve(&details, &contract_version).await?;

        self.phase(WorkflowStatus::ResolvingAddress);
        let address = self
            .registry
            .resolve_or_create(
                &user.customer_id,
                route.chain_name(),
                route.currency(),
                &account.external_account_id,
                account.kind,
            )
            .await?;

        // The breadcrumb must be durable before the irrevocable step.
        let attempt_id = AttemptId::new();
        self.ledger.write(attempt_id, link)?;

        self.phase(WorkflowStatus::AwaitingClaim);
        let tx = self.executor.claim(&route, &address.address, link).await?;
        *claim_tx = Some(tx.clone());

        // The hash is in hand; everything after this point is retry-safe.
        // Losing the clear only leaves a stale entry for reconciliation.
        if let Err(e) = self.ledger.clear(attempt_id) {
            warn!(%attempt_id, "failed to clear recovery entry, continuing: {e}");
        }

        self.phase(WorkflowStatus::Recording);
        let destination_chain_id = match &route {
            SettlementRoute::Bridged { dest_chain_id, .. } => dest_chain_id.clone(),
            // A direct claim settles on the link's own chain.
            SettlementRoute::Direct { .. } => details.chain_id.clone(),
        };
        let record = SettlementRecord {
            link: link.clone(),
            transaction_hash: tx.clone(),
            liquidation_address_id: address.id.clone(),
            customer_id: user.customer_id.clone(),
            external_account_id: account.external_account_id.clone(),
            destination_chain_id,
            destination_currency: route.currency().to_string(),
            usd_value,
            fee: fees::fee_for(account.kind),
            recorded_at: Utc::now(),
        };
        self.submitter.submit(&record).await?;

        Ok(CashoutReceipt {
            total_received: fees::total_received(usd_value, account.kind),
            transaction_hash: tx,
            record,
        })
    }

    fn phase(&mut self, status: WorkflowStatus) {
        self.status = status;
        info!(status = %status, "workflow phase");
    }
}
