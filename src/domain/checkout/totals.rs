//! Order totals.

use rust_decimal::Decimal;

use crate::{config::StoreConfig, money};

/// The totals breakdown for a checkout submission.
///
/// One computation feeds both the review display and the `total_amount`
/// persisted on the order, so the two can never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Σ unit price × quantity over the cart snapshot.
    pub subtotal: Decimal,
    /// Flat delivery fee from configuration.
    pub shipping_fee: Decimal,
    /// `subtotal × tax_rate`, rounded to the cent.
    pub tax: Decimal,
    /// `subtotal + shipping_fee + tax`.
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute the breakdown for a cart subtotal under the given store
    /// configuration.
    pub fn compute(subtotal: Decimal, config: &StoreConfig) -> Self {
        let subtotal = money::to_cents(subtotal);
        let tax = money::to_cents(subtotal * config.tax_rate);
        let total = money::to_cents(subtotal + config.shipping_fee + tax);

        Self {
            subtotal,
            shipping_fee: config.shipping_fee,
            tax,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_example() {
        // Cart of 45×1 + 120×2.
        let totals = OrderTotals::compute(Decimal::new(285, 0), &StoreConfig::new("http://x"));

        assert_eq!(totals.subtotal, Decimal::new(285, 0));
        assert_eq!(totals.shipping_fee, Decimal::new(150, 0));
        assert_eq!(totals.tax, Decimal::new(456, 1));
        assert_eq!(totals.total, Decimal::new(4806, 1));
    }

    #[test]
    fn empty_cart_still_carries_the_fee() {
        let totals = OrderTotals::compute(Decimal::ZERO, &StoreConfig::new("http://x"));

        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(150, 0));
    }

    #[test]
    fn configured_fee_and_rate_are_honored() {
        let mut config = StoreConfig::new("http://x");
        config.shipping_fee = Decimal::ZERO;
        config.tax_rate = Decimal::new(8, 2);

        let totals = OrderTotals::compute(Decimal::new(100, 0), &config);

        assert_eq!(totals.tax, Decimal::new(8, 0));
        assert_eq!(totals.total, Decimal::new(108, 0));
    }

    #[test]
    fn tax_rounds_to_the_cent() {
        // 33.33 × 0.16 = 5.3328 → 5.33
        let totals = OrderTotals::compute(Decimal::new(3333, 2), &StoreConfig::new("http://x"));

        assert_eq!(totals.tax, Decimal::new(533, 2));
        assert_eq!(totals.total, Decimal::new(18866, 2));
    }
}
