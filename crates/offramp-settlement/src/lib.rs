//! # offramp-settlement
//!
//! **Finality Plane**: crash-safe bookkeeping, on-chain link claiming, and
//! the cash-out workflow orchestrator.
//!
//! ## Architecture
//!
//! One attempt flows through the planes in a fixed order:
//! 1. Routing Plane resolves direct vs bridged settlement
//! 2. Partner Plane resolves or provisions the liquidation address
//! 3. **`RecoveryLedger`** writes the crash breadcrumb
//! 4. **`LinkClaimExecutor`** performs the single irrevocable claim
//! 5. **`RecoveryLedger`** clears the breadcrumb (non-fatal on failure)
//! 6. Partner Plane records the settlement
//!
//! ## Safety property
//!
//! The link is consumed by exactly one claim call, and only after the
//! recovery entry is durable. A crash between write and clear leaves the
//! entry for reconciliation tooling (`RecoveryLedger::list_stale`); a
//! failure before the claim leaves the link fully redeemable.

pub mod claim;
pub mod recovery;
pub mod workflow;

pub use claim::{ChainClient, LinkClaimExecutor};
pub use recovery::{JsonFileStore, MemoryStore, RecoveryEntry, RecoveryLedger, RecoveryStore, StaleEntry};
pub use workflow::{CashoutReceipt, FailureReport, WorkflowOrchestrator};
