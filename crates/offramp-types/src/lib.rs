//! # offramp-types
//!
//! Shared types, errors, and configuration for the **OffRamp** cash-out
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AttemptId`], [`CustomerId`], [`ExternalAccountId`],
//!   [`LiquidationAddressId`], [`ChainId`], [`TokenAddress`], [`TxHash`]
//! - **Link model**: [`ClaimLink`], [`PaymentLink`], [`TokenType`]
//! - **Account model**: [`Account`], [`AccountKind`], [`UserContext`]
//! - **Route model**: [`ChainOption`], [`BridgeRoute`], [`RouteRequest`], [`SettlementRoute`]
//! - **Liquidation model**: [`LiquidationAddress`], [`Rail`], [`SettlementCurrency`]
//! - **Settlement record**: [`SettlementRecord`]
//! - **Workflow status**: [`WorkflowStatus`]
//! - **Errors**: [`OfframpError`] with `OR_ERR_` prefix codes, [`FailureKind`]
//! - **Configuration**: [`OfframpConfig`], [`PartnerAssetMap`]
//! - **Constants**: fallback asset policy and fee schedule values

pub mod account;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod link;
pub mod liquidation;
pub mod record;
pub mod route;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use offramp_types::{PaymentLink, SettlementRoute, OfframpError, ...};

pub use account::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use link::*;
pub use liquidation::*;
pub use record::*;
pub use route::*;
pub use status::*;

// Constants are accessed via `offramp_types::constants::FOO`
// (not re-exported to avoid name collisions).
