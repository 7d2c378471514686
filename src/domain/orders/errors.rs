//! Order service errors.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced while persisting an order.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The buyer has no valid session.
    #[error("please log in to continue")]
    LoginRequired,

    /// The order service acknowledged the creation but its response carried
    /// no usable order id, so line items and payment cannot proceed.
    #[error("order service response carried no order id")]
    MissingOrderId,

    /// The order service rejected or failed the request.
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for OrdersError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::LoginRequired,
            other => Self::Api(other),
        }
    }
}
