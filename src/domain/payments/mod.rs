//! Payments

pub mod errors;
pub mod gateway;
pub mod models;

pub use errors::PaymentsError;
pub use gateway::*;
pub use models::{Msisdn, MsisdnError, PaymentAck};
