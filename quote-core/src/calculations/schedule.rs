//! Delivery schedule helpers.
//!
//! Turns a standard duration in weeks into the express delivery time, the
//! month counts a custom schedule may choose from, and the display string
//! shown beside the price.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::calculations::common::{WEEKS_PER_MONTH, ceil_weeks, max, pluralize};
use crate::models::DeliveryMode;

/// Longest custom schedule, in months, that can be requested.
pub const MAX_CUSTOM_MONTHS: u32 = 14;

/// Shortest schedule, in weeks, a custom plan can be compressed to.
const MIN_CUSTOM_WEEKS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Smallest custom schedule, in months, for a project of `baseline_weeks`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::min_custom_months;
///
/// // ceil(14 × 0.6) = 9 weeks, so at least 3 months
/// assert_eq!(min_custom_months(dec!(14), dec!(0.6)), 3);
/// ```
pub fn min_custom_months(
    baseline_weeks: Decimal,
    min_duration_factor: Decimal,
) -> u32 {
    let scaled = ceil_weeks(baseline_weeks.saturating_mul(min_duration_factor));
    let min_weeks = max(MIN_CUSTOM_WEEKS, scaled);
    (min_weeks / WEEKS_PER_MONTH)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Month counts offered for a custom schedule, shortest first.
///
/// Empty when the minimum viable schedule exceeds [`MAX_CUSTOM_MONTHS`].
pub fn custom_month_options(
    baseline_weeks: Decimal,
    min_duration_factor: Decimal,
) -> Vec<u32> {
    let first = min_custom_months(baseline_weeks, min_duration_factor).max(1);
    (first..=MAX_CUSTOM_MONTHS).collect()
}

/// Whole weeks needed when delivering on the express track.
pub fn express_weeks(
    baseline_weeks: Decimal,
    time_factor: Decimal,
) -> Decimal {
    ceil_weeks(baseline_weeks.saturating_mul(time_factor))
}

/// Display string for the delivery time.
///
/// Custom schedules show the chosen month count; everything else shows
/// whole weeks.
pub fn delivery_display(
    mode: DeliveryMode,
    delivery_weeks: Decimal,
    custom_months: Option<u32>,
) -> String {
    match (mode, custom_months) {
        (DeliveryMode::Custom, Some(months)) => pluralize(Decimal::from(months), "Month"),
        _ => pluralize(delivery_weeks, "Week"),
    }
}
