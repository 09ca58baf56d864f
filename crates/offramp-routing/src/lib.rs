//! # offramp-routing
//!
//! **Routing Plane**: decides how a claimed asset reaches the banking
//! partner.
//!
//! ## Architecture
//!
//! The Routing Plane sits between the workflow and the bridging venue:
//! 1. **`RouteResolver`**: direct partner mapping first, fallback bridge
//!    otherwise
//! 2. **`BridgingVenue`**: client trait for the cross-chain venue
//! 3. **version gate**: cross-chain claims require escrow contract ≥ v4.2
//!
//! ## Route Flow
//!
//! ```text
//! PaymentLink → PartnerAssetMap lookup ─ hit ─→ SettlementRoute::Direct
//!                         │ miss
//!                         ▼
//!     venue.chain_options() → eligibility filter → version gate
//!                         │
//!                         ▼
//!     venue.compute_route(→ USDC on Optimism) → SettlementRoute::Bridged
//! ```
//!
//! The bridging target is fixed by policy; the venue's candidate list is
//! only evidence that bridging from the source chain is possible at all.

pub mod resolver;
pub mod venue;
pub mod version;

pub use resolver::RouteResolver;
pub use venue::{BridgingVenue, eligible_options};
pub use version::{Version, check_min_version};
