//! System-wide constants for the OffRamp cash-out engine.

use rust_decimal::Decimal;

/// USDC contract address on Optimism — the fixed bridging fallback asset.
pub const USDC_ADDRESS_OPTIMISM: &str = "0x0b2c639c533813f4aa9d7837caf62653d097ff85";

/// Optimism chain id — the fixed bridging fallback chain.
pub const OPTIMISM_CHAIN_ID: &str = "10";

/// Ethereum mainnet is excluded as a bridging target.
pub const EXCLUDED_BRIDGE_CHAIN_ID: &str = "1";

/// Minimum escrow contract version that supports cross-chain claims.
pub const MIN_XCHAIN_CONTRACT_VERSION: &str = "v4.2";

/// Flat fee charged for SEPA (IBAN) settlements, in USD.
pub const SEPA_FEE_USD: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Flat fee charged for ACH settlements, in USD.
pub const ACH_FEE_USD: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Decimal places used when presenting USD amounts.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Key prefix for recovery entries in the durable store.
pub const RECOVERY_KEY_PREFIX: &str = "cashout/recovery/";

/// Recovery entries older than this are surfaced by reconciliation tooling.
pub const DEFAULT_STALE_AFTER_SECS: u64 = 300;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OffRamp";
