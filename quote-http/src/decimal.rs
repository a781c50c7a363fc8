use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_json::Number;

/// Convert a Decimal to a JSON number.
///
/// Whole values are sent as integers so amounts like `150000` never turn
/// into `150000.0` on the wire.
pub fn decimal_to_number(d: Decimal) -> Number {
    let normalized = d.normalize();
    if normalized.fract().is_zero() {
        if let Some(whole) = normalized.to_i64() {
            return Number::from(whole);
        }
    }
    normalized
        .to_f64()
        .and_then(Number::from_f64)
        .unwrap_or_else(|| Number::from(0))
}

/// `serialize_with` adapter writing a Decimal as a JSON number.
pub fn serialize_number<S>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    decimal_to_number(*value).serialize(serializer)
}
