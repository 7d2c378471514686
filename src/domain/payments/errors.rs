//! Payment gateway errors.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced while initiating a payment.
///
/// A reachable gateway saying no is not an error here; that verdict travels
/// as [`PaymentAck::Rejected`](crate::domain::payments::PaymentAck).
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// The buyer has no valid session.
    #[error("please log in to continue")]
    LoginRequired,

    /// Nothing reachable answered the payment request. Checkout may degrade
    /// to a demo acknowledgement on this variant, depending on
    /// configuration.
    #[error("payment gateway unreachable")]
    Unavailable(#[source] ApiError),
}
