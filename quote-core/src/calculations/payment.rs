//! Payment plan helpers: tenure gating and installment amounts.

use rust_decimal::Decimal;

use crate::calculations::common::{MONTHS_PER_YEAR, round_currency};
use crate::models::PaymentTenure;

/// Returns the tenures offered for a project worth `raw_total`.
///
/// A tenure with a zero (or negative) threshold is always offered; any
/// other tenure requires `raw_total` to be strictly above its threshold.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::tenure_available;
///
/// assert!(tenure_available(dec!(0), dec!(1)));
/// assert!(!tenure_available(dec!(500000), dec!(500000)));
/// assert!(tenure_available(dec!(500000), dec!(500001)));
/// ```
pub fn tenure_available(
    threshold: Decimal,
    raw_total: Decimal,
) -> bool {
    threshold <= Decimal::ZERO || threshold < raw_total
}

/// Filters the configured tenures down to those available for `raw_total`.
pub fn available_tenures(
    tenures: &[PaymentTenure],
    raw_total: Decimal,
) -> Vec<PaymentTenure> {
    tenures
        .iter()
        .filter(|t| tenure_available(t.threshold, raw_total))
        .cloned()
        .collect()
}

/// Monthly installment after the agreement charge, rounded to a whole unit.
///
/// Zero for a non-positive tenure.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::installment;
///
/// assert_eq!(installment(dec!(150000), dec!(15000), dec!(1)), dec!(11250));
/// assert_eq!(installment(dec!(150000), dec!(15000), dec!(0)), dec!(0));
/// ```
pub fn installment(
    total: Decimal,
    agreement_charge: Decimal,
    tenure_years: Decimal,
) -> Decimal {
    if tenure_years <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let months = tenure_years.saturating_mul(MONTHS_PER_YEAR);
    total
        .saturating_sub(agreement_charge)
        .checked_div(months)
        .map_or(Decimal::MAX, round_currency)
}
