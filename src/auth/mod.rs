//! Auth
//!
//! Session probe against the store's auth service. Both the cart and the
//! checkout flow treat an unauthenticated session as a redirect-to-login
//! signal, never as an in-flow error.

pub mod models;
pub mod service;

pub use models::Session;
pub use service::*;
