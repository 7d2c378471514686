//! Orders

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::OrdersError;
pub use models::{CreatedOrder, NewOrder, NewOrderItem, OrderStatus};
pub use repository::*;
