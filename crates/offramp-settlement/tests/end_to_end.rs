//! End-to-end integration tests across all three planes.
//!
//! These tests exercise the full cash-out pipeline:
//! Routing Plane -> Partner Plane -> Finality Plane
//!
//! They verify the workflow's core properties in realistic scenarios:
//! idempotent address reuse, at-most-once claiming, fixed-fallback
//! bridging, recovery-entry lifecycle, fee math, and failure handling
//! after the irrevocable claim step.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use offramp_partner::{CreateLiquidationAddress, PartnerApi, SettlementSubmitter};
use offramp_routing::BridgingVenue;
use offramp_settlement::{
    ChainClient, MemoryStore, RecoveryStore, WorkflowOrchestrator,
};
use offramp_types::*;

// =============================================================================
// Scripted collaborators
// =============================================================================

struct ScriptedVenue {
    options: Vec<ChainOption>,
    route_available: bool,
}

#[async_trait]
impl BridgingVenue for ScriptedVenue {
    async fn chain_options(
        &self,
        _source_chain_id: &ChainId,
        _token_type: TokenType,
        _is_testnet: bool,
    ) -> Result<Vec<ChainOption>> {
        Ok(self.options.clone())
    }

    async fn compute_route(&self, _request: &RouteRequest) -> Result<Option<BridgeRoute>> {
        Ok(self.route_available.then(|| BridgeRoute {
            route_id: "r-1".into(),
            estimated_output: "24.42".into(),
        }))
    }
}

#[derive(Default)]
struct ScriptedPartner {
    addresses: Mutex<Vec<LiquidationAddress>>,
    create_calls: AtomicUsize,
    last_create_request: Mutex<Option<CreateLiquidationAddress>>,
    submissions: AtomicUsize,
    fail_submit: AtomicBool,
    fail_create: AtomicBool,
    last_submitted: Mutex<Option<SettlementRecord>>,
}

#[async_trait]
impl PartnerApi for ScriptedPartner {
    async fn list_liquidation_addresses(
        &self,
        _customer_id: &CustomerId,
    ) -> Result<Vec<LiquidationAddress>> {
        Ok(self.addresses.lock().unwrap().clone())
    }

    async fn create_liquidation_address(
        &self,
        request: &CreateLiquidationAddress,
    ) -> Result<LiquidationAddress> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(OfframpError::Internal("partner 503".into()));
        }
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_create_request.lock().unwrap() = Some(request.clone());
        let address = LiquidationAddress {
            id: LiquidationAddressId(format!("liq_{n}")),
            address: format!("0xdeposit{n}"),
            chain: request.chain.clone(),
            currency: request.currency.clone(),
            external_account_id: request.external_account_id.clone(),
        };
        self.addresses.lock().unwrap().push(address.clone());
        Ok(address)
    }

    async fn submit_settlement(&self, record: &SettlementRecord) -> Result<()> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        *self.last_submitted.lock().unwrap() = Some(record.clone());
        if self.fail_submit.load(Ordering::SeqCst) {
            Err(OfframpError::Internal("ledger unavailable".into()))
        } else {
            Ok(())
        }
    }
}

struct ScriptedChain {
    /// Store handle so the stub can observe the recovery entry at claim time.
    store: Arc<MemoryStore>,
    direct_claims: AtomicUsize,
    xchain_claims: AtomicUsize,
    fail_claim: AtomicBool,
    entries_at_claim: Mutex<Option<usize>>,
}

impl ScriptedChain {
    fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            direct_claims: AtomicUsize::new(0),
            xchain_claims: AtomicUsize::new(0),
            fail_claim: AtomicBool::new(false),
            entries_at_claim: Mutex::new(None),
        }
    }

    fn total_claims(&self) -> usize {
        self.direct_claims.load(Ordering::SeqCst) + self.xchain_claims.load(Ordering::SeqCst)
    }

    fn observe(&self) -> Result<TxHash> {
        *self.entries_at_claim.lock().unwrap() = Some(self.store.entries()?.len());
        if self.fail_claim.load(Ordering::SeqCst) {
            Err(OfframpError::Internal("execution reverted".into()))
        } else {
            Ok(TxHash("0xclaimhash".into()))
        }
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    async fn link_details(&self, link: &ClaimLink) -> Result<PaymentLink> {
        // A chain/token pair the partner has no direct mapping for.
        Ok(PaymentLink {
            link: link.clone(),
            chain_id: ChainId::new("5000"),
            token_address: TokenAddress::new("0x1111111111111111111111111111111111111111"),
            token_amount: "25.0".into(),
            token_decimals: 18,
            sender_address: "0xsender".into(),
        })
    }

    async fn latest_contract_version(&self, _chain_id: &ChainId) -> Result<String> {
        Ok("v4.3".into())
    }

    async fn claim_direct(&self, _address: &str, _link: &ClaimLink) -> Result<TxHash> {
        self.direct_claims.fetch_add(1, Ordering::SeqCst);
        self.observe()
    }

    async fn claim_cross_chain(
        &self,
        _address: &str,
        _link: &ClaimLink,
        dest_chain_id: &ChainId,
        dest_token: &TokenAddress,
    ) -> Result<TxHash> {
        assert_eq!(dest_chain_id, &ChainId::new(constants::OPTIMISM_CHAIN_ID));
        assert_eq!(
            dest_token,
            &TokenAddress::new(constants::USDC_ADDRESS_OPTIMISM)
        );
        self.xchain_claims.fetch_add(1, Ordering::SeqCst);
        self.observe()
    }
}

/// Store wrapper so a test can keep inspecting the memory store the
/// orchestrator owns.
struct SharedStore(Arc<MemoryStore>);

impl RecoveryStore for SharedStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.0.put(key, value)
    }
    fn remove(&self, key: &str) -> Result<()> {
        self.0.remove(key)
    }
    fn entries(&self) -> Result<Vec<(String, String)>> {
        self.0.entries()
    }
}

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    partner: Arc<ScriptedPartner>,
    chain: Arc<ScriptedChain>,
    store: Arc<MemoryStore>,
    wf: WorkflowOrchestrator,
}

impl Harness {
    fn new(options: Vec<ChainOption>, route_available: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let partner = Arc::new(ScriptedPartner::default());
        let chain = Arc::new(ScriptedChain::new(store.clone()));
        let wf = WorkflowOrchestrator::new(
            PartnerAssetMap::mainnet(),
            false,
            Arc::new(ScriptedVenue {
                options,
                route_available,
            }),
            partner.clone(),
            chain.clone(),
            Box::new(SharedStore(store.clone())),
        );
        Self {
            partner,
            chain,
            store,
            wf,
        }
    }

    fn default_options() -> Vec<ChainOption> {
        vec![
            ChainOption {
                chain_id: ChainId::new("8453"),
                chain_name: "base".into(),
            },
            ChainOption {
                chain_id: ChainId::new("10"),
                chain_name: "optimism".into(),
            },
            ChainOption {
                chain_id: ChainId::new("42161"),
                chain_name: "arbitrum".into(),
            },
        ]
    }
}

fn user() -> UserContext {
    UserContext {
        user_id: "user-1".into(),
        customer_id: CustomerId("cus_1".into()),
        accounts: vec![
            Account::new(
                "021000021-123456789",
                AccountKind::Ach,
                ExternalAccountId("ext_us".into()),
            ),
            Account::new(
                "DE89 3704 0044 0532 0130 00",
                AccountKind::Iban,
                ExternalAccountId("ext_de".into()),
            ),
        ],
    }
}

const ACH_RECIPIENT: &str = "021000021-123456789";
const IBAN_RECIPIENT: &str = "de89370400440532013000";

// =============================================================================
// Test: full bridged cash-out across all three planes
// =============================================================================
#[tokio::test]
async fn e2e_bridged_cashout_reaches_done() {
    let mut h = Harness::new(Harness::default_options(), true);

    let receipt = h
        .wf
        .settle(
            &ClaimLink::new("link-1"),
            &user(),
            ACH_RECIPIENT,
            Decimal::new(2500, 2),
        )
        .await
        .unwrap();

    assert_eq!(h.wf.status(), WorkflowStatus::Done);

    // Claim went through the cross-chain path, exactly once.
    assert_eq!(h.chain.xchain_claims.load(Ordering::SeqCst), 1);
    assert_eq!(h.chain.direct_claims.load(Ordering::SeqCst), 0);

    // The address was provisioned for the fallback destination on the
    // ACH rail with USD settlement.
    let create = h.partner.last_create_request.lock().unwrap().clone().unwrap();
    assert_eq!(create.chain, "optimism");
    assert_eq!(create.currency, "usdc");
    assert_eq!(create.rail, Rail::Ach);
    assert_eq!(create.settlement_currency, SettlementCurrency::Usd);
    assert_eq!(create.external_account_id, ExternalAccountId("ext_us".into()));

    // The recovery entry existed while the claim ran and is gone now.
    assert_eq!(*h.chain.entries_at_claim.lock().unwrap(), Some(1));
    assert!(h.store.entries().unwrap().is_empty());

    // The settlement was recorded with the obtained hash.
    assert_eq!(h.partner.submissions.load(Ordering::SeqCst), 1);
    assert_eq!(receipt.transaction_hash, TxHash("0xclaimhash".into()));
    assert_eq!(receipt.record.destination_chain_id, ChainId::new("10"));
    assert_eq!(receipt.record.destination_currency, "usdc");
    assert_eq!(receipt.record.fee, Decimal::new(50, 2));
}

// =============================================================================
// Test: idempotent address reuse across attempts
// =============================================================================
#[tokio::test]
async fn address_created_once_and_reused() {
    let mut h = Harness::new(Harness::default_options(), true);

    h.wf.settle(
        &ClaimLink::new("link-1"),
        &user(),
        ACH_RECIPIENT,
        Decimal::new(2500, 2),
    )
    .await
    .unwrap();
    let first_id = h
        .partner
        .last_submitted
        .lock()
        .unwrap()
        .clone()
        .unwrap()
        .liquidation_address_id;

    // A second link to the same (chain, currency, account) destination.
    h.wf.settle(
        &ClaimLink::new("link-2"),
        &user(),
        ACH_RECIPIENT,
        Decimal::new(1000, 2),
    )
    .await
    .unwrap();
    let second_id = h
        .partner
        .last_submitted
        .lock()
        .unwrap()
        .clone()
        .unwrap()
        .liquidation_address_id;

    assert_eq!(h.partner.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first_id, second_id);
}

// =============================================================================
// Test: failures before the claim never claim
// =============================================================================
#[tokio::test]
async fn unavailable_route_never_claims() {
    // Venue offers only excluded targets.
    let mut h = Harness::new(
        vec![ChainOption {
            chain_id: ChainId::new("1"),
            chain_name: "ethereum".into(),
        }],
        true,
    );

    let err = h
        .wf
        .settle(
            &ClaimLink::new("link-1"),
            &user(),
            ACH_RECIPIENT,
            Decimal::new(2500, 2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OfframpError::RouteUnavailable(_)));
    assert_eq!(
        h.wf.status(),
        WorkflowStatus::Failed(FailureKind::RouteUnavailable)
    );
    assert_eq!(h.chain.total_claims(), 0);
    // Nothing was written to the recovery store either.
    assert!(h.store.entries().unwrap().is_empty());
}

#[tokio::test]
async fn provisioning_failure_never_claims() {
    let h = Harness::new(Harness::default_options(), true);
    h.partner.fail_create.store(true, Ordering::SeqCst);
    let mut h = h;

    let err = h
        .wf
        .settle(
            &ClaimLink::new("link-1"),
            &user(),
            ACH_RECIPIENT,
            Decimal::new(2500, 2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OfframpError::AddressProvisioning { .. }));
    assert_eq!(
        h.wf.status(),
        WorkflowStatus::Failed(FailureKind::AddressProvisioning)
    );
    assert_eq!(h.chain.total_claims(), 0);
    assert!(h.store.entries().unwrap().is_empty());
}

// =============================================================================
// Test: the bridging fallback is fixed, not picked from the option list
// =============================================================================
#[tokio::test]
async fn fallback_target_is_independent_of_option_order() {
    for options in [
        Harness::default_options(),
        vec![
            ChainOption {
                chain_id: ChainId::new("42161"),
                chain_name: "arbitrum".into(),
            },
            ChainOption {
                chain_id: ChainId::new("8453"),
                chain_name: "base".into(),
            },
        ],
    ] {
        let mut h = Harness::new(options, true);
        let receipt = h
            .wf
            .settle(
                &ClaimLink::new("link-1"),
                &user(),
                ACH_RECIPIENT,
                Decimal::new(2500, 2),
            )
            .await
            .unwrap();
        // The cross-chain claim's destination assertions live in the chain
        // stub; the record confirms the same destination.
        assert_eq!(receipt.record.destination_chain_id, ChainId::new("10"));
        assert_eq!(receipt.record.destination_currency, "usdc");
    }
}

// =============================================================================
// Test: fee schedule by account kind
// =============================================================================
#[tokio::test]
async fn iban_settlement_charges_one_dollar() {
    let mut h = Harness::new(Harness::default_options(), true);

    let receipt = h
        .wf
        .settle(
            &ClaimLink::new("link-1"),
            &user(),
            IBAN_RECIPIENT,
            Decimal::new(2500, 2),
        )
        .await
        .unwrap();

    assert_eq!(receipt.record.fee, Decimal::new(1, 0));
    assert_eq!(receipt.total_received, Decimal::new(2400, 2));

    // IBAN provisioning rides the SEPA rail with EUR settlement.
    let create = h.partner.last_create_request.lock().unwrap().clone().unwrap();
    assert_eq!(create.rail, Rail::Sepa);
    assert_eq!(create.settlement_currency, SettlementCurrency::Eur);
}

#[tokio::test]
async fn ach_settlement_charges_fifty_cents() {
    let mut h = Harness::new(Harness::default_options(), true);

    let receipt = h
        .wf
        .settle(
            &ClaimLink::new("link-1"),
            &user(),
            ACH_RECIPIENT,
            Decimal::new(2500, 2),
        )
        .await
        .unwrap();

    assert_eq!(receipt.record.fee, Decimal::new(50, 2));
    assert_eq!(receipt.total_received, Decimal::new(2450, 2));
}

// =============================================================================
// Test: submission failure after a successful claim
// =============================================================================
#[tokio::test]
async fn submission_failure_preserves_transaction_hash() {
    let h = Harness::new(Harness::default_options(), true);
    h.partner.fail_submit.store(true, Ordering::SeqCst);
    let mut h = h;

    let err = h
        .wf
        .settle(
            &ClaimLink::new("link-1"),
            &user(),
            ACH_RECIPIENT,
            Decimal::new(2500, 2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OfframpError::Submission { .. }));
    assert_eq!(
        h.wf.status(),
        WorkflowStatus::Failed(FailureKind::Submission)
    );

    // The claim happened exactly once and the hash survives for display
    // and manual reconciliation.
    assert_eq!(h.chain.total_claims(), 1);
    let report = h.wf.failure().unwrap();
    assert!(report.reclaim_available());
    assert_eq!(
        report.transaction_hash,
        Some(TxHash("0xclaimhash".into()))
    );

    // The recovery entry was cleared when the hash was obtained — the
    // remaining failure is bank-side only.
    assert!(h.store.entries().unwrap().is_empty());

    // Retrying the submission alone does not re-claim.
    let record = h.partner.last_submitted.lock().unwrap().clone().unwrap();
    h.partner.fail_submit.store(false, Ordering::SeqCst);
    SettlementSubmitter::new(h.partner.clone())
        .submit(&record)
        .await
        .unwrap();
    assert_eq!(h.chain.total_claims(), 1);
    assert_eq!(h.partner.submissions.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Test: claim failure leaves the breadcrumb and the link intact
// =============================================================================
#[tokio::test]
async fn claim_failure_keeps_recovery_entry() {
    let h = Harness::new(Harness::default_options(), true);
    h.chain.fail_claim.store(true, Ordering::SeqCst);
    let mut h = h;

    let link = ClaimLink::new("link-1");
    let err = h
        .wf
        .settle(&link, &user(), ACH_RECIPIENT, Decimal::new(2500, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, OfframpError::ClaimExecution { .. }));
    assert_eq!(
        h.wf.status(),
        WorkflowStatus::Failed(FailureKind::ClaimExecution)
    );

    // No hash was obtained; the link stays redeemable by its holder.
    let report = h.wf.failure().unwrap();
    assert!(!report.reclaim_available());
    assert_eq!(report.link, link);

    // The breadcrumb stays behind for reconciliation tooling, pointing at
    // the link whose claim is now in doubt.
    let stale = h.wf.ledger().list_stale(chrono::Duration::zero()).unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].entry.link, link);

    // Nothing was recorded with the partner.
    assert_eq!(h.partner.submissions.load(Ordering::SeqCst), 0);
}
