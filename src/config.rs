//! Store configuration.

use std::time::Duration;

use rust_decimal::Decimal;

/// Configuration for a SokoDigital storefront session.
///
/// Shipping fee and tax rate are injected here rather than hard-coded so the
/// checkout totals can track regional policy without code changes.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store backend, e.g. `"https://api.sokodigital.example"`.
    pub base_url: String,

    /// Timeout applied to every request.
    pub request_timeout: Duration,

    /// Flat shipping fee added to every order.
    pub shipping_fee: Decimal,

    /// Tax rate applied to the cart subtotal.
    pub tax_rate: Decimal,

    /// When the payment gateway is unreachable at the transport level,
    /// acknowledge the order in demo mode instead of failing the checkout.
    /// Turn this off to make gateway downtime a hard failure.
    pub demo_payment_fallback: bool,
}

impl StoreConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a configuration for the given backend with the reference
    /// defaults: 30 second timeout, KSh 150 shipping, 16% tax, demo payment
    /// fallback enabled.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Self::DEFAULT_TIMEOUT,
            shipping_fee: Decimal::new(150_00, 2),
            tax_rate: Decimal::new(16, 2),
            demo_payment_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_defaults() {
        let config = StoreConfig::new("https://api.example");

        assert_eq!(config.shipping_fee, Decimal::new(150, 0));
        assert_eq!(config.tax_rate, Decimal::new(16, 2));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.demo_payment_fallback);
    }
}
