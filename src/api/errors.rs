//! API errors.

use thiserror::Error;

/// Errors produced at the HTTP boundary.
///
/// Every non-2xx response collapses into one of these before a domain module
/// sees it, so shape tolerance and message extraction live in exactly one
/// place.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session is missing or expired.
    #[error("please log in to continue")]
    Unauthorized,

    /// The request never produced a usable response (connect failure,
    /// timeout, broken transfer).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. The message is drawn from
    /// the body's `message` or `error` field when present.
    #[error("{message}")]
    Service {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },

    /// The response body could not be decoded as JSON.
    #[error("unexpected response body")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the failure happened below the service (nothing reachable
    /// answered), as opposed to a service-level rejection.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
