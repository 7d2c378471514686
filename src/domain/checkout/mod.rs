//! Checkout

pub mod errors;
pub mod flow;
pub mod shipping;
pub mod totals;

pub use errors::CheckoutError;
pub use flow::{CheckoutFlow, Confirmation, PaymentSubmission, Stage};
pub use shipping::{ShippingError, ShippingInfo};
pub use totals::OrderTotals;
