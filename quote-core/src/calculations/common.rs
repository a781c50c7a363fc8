//! Common utility functions for quotation calculations.
//!
//! This module provides the rounding and comparison helpers shared by the
//! cost, schedule and payment computations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Weeks counted per month when comparing custom schedules.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Months per year for installment plans.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a decimal value to a whole currency unit using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_currency;
///
/// assert_eq!(round_currency(dec!(11249.4)), dec!(11249));
/// assert_eq!(round_currency(dec!(11249.5)), dec!(11250));
/// assert_eq!(round_currency(dec!(-10.5)), dec!(-11)); // Away from zero
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a week count up to the next whole week.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::ceil_weeks;
///
/// assert_eq!(ceil_weeks(dec!(6.5)), dec!(7));
/// assert_eq!(ceil_weeks(dec!(7)), dec!(7));
/// ```
pub fn ceil_weeks(value: Decimal) -> Decimal {
    value.ceil()
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::max;
///
/// assert_eq!(max(dec!(4), dec!(2.4)), dec!(4));
/// assert_eq!(max(dec!(2.4), dec!(9)), dec!(9));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// English plural for a whole-unit count, e.g. `"1 Month"` or `"3 Months"`.
pub fn pluralize(
    count: Decimal,
    unit: &str,
) -> String {
    if count == Decimal::ONE {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_currency tests
    // =========================================================================

    #[test]
    fn round_currency_rounds_down_below_midpoint() {
        let result = round_currency(dec!(123.49));

        assert_eq!(result, dec!(123));
    }

    #[test]
    fn round_currency_rounds_up_at_midpoint() {
        let result = round_currency(dec!(123.5));

        assert_eq!(result, dec!(124));
    }

    #[test]
    fn round_currency_handles_negative_values() {
        let result = round_currency(dec!(-123.5));

        assert_eq!(result, dec!(-124)); // Away from zero
    }

    #[test]
    fn round_currency_preserves_whole_values() {
        let result = round_currency(dec!(135000.00));

        assert_eq!(result, dec!(135000));
    }

    #[test]
    fn round_currency_handles_zero() {
        assert_eq!(round_currency(Decimal::ZERO), dec!(0));
    }

    // =========================================================================
    // ceil_weeks tests
    // =========================================================================

    #[test]
    fn ceil_weeks_rounds_fraction_up() {
        assert_eq!(ceil_weeks(dec!(2.8)), dec!(3));
    }

    #[test]
    fn ceil_weeks_keeps_whole_weeks() {
        assert_eq!(ceil_weeks(dec!(14)), dec!(14));
    }

    // =========================================================================
    // max / pluralize tests
    // =========================================================================

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(4), dec!(4.0)), dec!(4));
    }

    #[test]
    fn pluralize_singular_and_plural() {
        assert_eq!(pluralize(dec!(1), "Month"), "1 Month");
        assert_eq!(pluralize(dec!(7), "Week"), "7 Weeks");
    }
}
