//! # offramp-partner
//!
//! **Partner Plane**: everything that talks to the banking partner.
//!
//! ## Architecture
//!
//! 1. **`PartnerApi`**: client trait for the partner's REST surface
//! 2. **`LiquidationAddressRegistry`**: idempotent resolve-or-create of
//!    deposit addresses keyed by (chain, currency, external account)
//! 3. **`SettlementSubmitter`**: appends completed settlements to the
//!    partner ledger
//! 4. **fee schedule**: flat SEPA/ACH fees and net-amount math
//!
//! The registry and submitter never retry internally; callers decide
//! whether a failed attempt is re-run.

pub mod client;
pub mod fees;
pub mod registry;
pub mod submitter;

pub use client::{CreateLiquidationAddress, PartnerApi};
pub use registry::LiquidationAddressRegistry;
pub use submitter::SettlementSubmitter;
