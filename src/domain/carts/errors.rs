//! Cart errors.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by cart mutations.
///
/// Loading is absent here on purpose: a failed load collapses the cart to
/// empty instead of failing.
#[derive(Debug, Error)]
pub enum CartsError {
    /// The buyer has no valid session. Callers redirect to login rather than
    /// showing a generic failure.
    #[error("please log in to manage your cart")]
    LoginRequired,

    /// The referenced cart line does not exist locally.
    #[error("cart item {0} not found")]
    ItemNotFound(String),

    /// Quantities below 1 are rejected; removing the line is the only way to
    /// eliminate it.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The remote cart store rejected or failed the request.
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for CartsError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::LoginRequired,
            other => Self::Api(other),
        }
    }
}
