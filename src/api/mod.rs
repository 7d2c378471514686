//! Remote API plumbing
//!
//! Everything this crate says to the store backend goes through
//! [`ApiClient`], which owns the session cookie jar, the request timeout and
//! the error normalization rules.

pub mod client;
pub mod errors;

pub use client::ApiClient;
pub use errors::ApiError;
