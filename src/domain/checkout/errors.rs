//! Checkout errors.

use thiserror::Error;

use crate::domain::{
    checkout::shipping::ShippingError,
    orders::OrdersError,
    payments::PaymentsError,
};

/// Errors surfaced by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout is meaningless on an empty cart; callers leave checkout and
    /// send the buyer back to the cart page.
    #[error("your cart is empty")]
    EmptyCart,

    /// The requested action does not exist at the current stage.
    #[error("that action is not available at this checkout stage")]
    StageMismatch,

    /// Shipping details were incomplete.
    #[error(transparent)]
    Shipping(#[from] ShippingError),

    /// Creating the order or its line items failed. The cart is left intact
    /// so the buyer can retry.
    #[error(transparent)]
    Orders(#[from] OrdersError),

    /// Initiating the payment failed hard (gateway unreachable with the demo
    /// fallback disabled, or no session).
    #[error(transparent)]
    Payments(#[from] PaymentsError),

    /// A reachable payment gateway declined the request.
    #[error("payment was not accepted: {0}")]
    PaymentDeclined(String),
}

impl CheckoutError {
    /// Whether this failure means the buyer should be sent to login instead
    /// of being shown an error.
    pub fn is_login_required(&self) -> bool {
        matches!(
            self,
            Self::Orders(OrdersError::LoginRequired) | Self::Payments(PaymentsError::LoginRequired)
        )
    }
}
