//! Fee schedule for partner settlements.
//!
//! Flat per-transfer fees: $1 for SEPA (IBAN accounts), $0.50 for ACH.
//! Amounts shown to the user are rounded to cents.

use rust_decimal::Decimal;

use offramp_types::{AccountKind, constants};

/// Flat fee in USD for settling to the given account kind.
#[must_use]
pub fn fee_for(kind: AccountKind) -> Decimal {
    match kind {
        AccountKind::Iban => constants::SEPA_FEE_USD,
        AccountKind::Ach => constants::ACH_FEE_USD,
    }
}

/// Amount the user receives after the flat fee, rounded to display
/// precision. Never negative.
#[must_use]
pub fn total_received(usd_value: Decimal, kind: AccountKind) -> Decimal {
    let net = (usd_value - fee_for(kind)).round_dp(constants::DISPLAY_DECIMALS);
    net.max(Decimal::ZERO)
}

/// Human description of the fee for the given account kind, for
/// presentation layers.
#[must_use]
pub fn describe(kind: AccountKind) -> String {
    match kind {
        AccountKind::Iban => format!("For SEPA transfers a fee of ${} is charged.", fee_for(kind)),
        AccountKind::Ach => format!("For ACH transfers a fee of ${} is charged.", fee_for(kind)),
    }
}
