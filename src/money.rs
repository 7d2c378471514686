//! Money
//!
//! Monetary amounts are [`Decimal`] end to end. The remote services are loose
//! about wire representation, so amounts are coerced rather than parsed
//! strictly: numbers and numeric strings both work, and anything else
//! collapses to zero instead of failing the whole payload.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Coerce a wire value into an amount.
///
/// Accepts JSON numbers and numeric strings; whitespace around a string is
/// ignored. Any other value, including malformed numeric strings, yields
/// [`Decimal::ZERO`].
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => number.to_string().parse().unwrap_or(Decimal::ZERO),
        Value::String(text) => text.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Round an amount to whole cents, half away from zero.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display in Kenyan shillings.
pub fn format_kes(amount: Decimal) -> String {
    format!("KSh {:.2}", to_cents(amount))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_numbers() {
        assert_eq!(coerce_amount(&json!(45)), Decimal::new(45, 0));
        assert_eq!(coerce_amount(&json!(120.5)), Decimal::new(1205, 1));
    }

    #[test]
    fn coerces_numeric_strings() {
        assert_eq!(coerce_amount(&json!("45.60")), Decimal::new(4560, 2));
        assert_eq!(coerce_amount(&json!("  150 ")), Decimal::new(150, 0));
    }

    #[test]
    fn garbage_collapses_to_zero() {
        assert_eq!(coerce_amount(&json!("not a price")), Decimal::ZERO);
        assert_eq!(coerce_amount(&json!(null)), Decimal::ZERO);
        assert_eq!(coerce_amount(&json!({ "amount": 45 })), Decimal::ZERO);
        assert_eq!(coerce_amount(&json!([45])), Decimal::ZERO);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(to_cents(Decimal::new(45605, 3)), Decimal::new(4561, 2));
        assert_eq!(to_cents(Decimal::new(456, 1)), Decimal::new(4560, 2));
    }

    #[test]
    fn formats_kes() {
        assert_eq!(format_kes(Decimal::new(4806, 1)), "KSh 480.60");
    }
}
