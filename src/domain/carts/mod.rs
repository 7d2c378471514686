//! Carts

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::CartsError;
pub use models::CartItem;
pub use service::Cart;
