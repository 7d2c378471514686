//! Order models.

use rust_decimal::Decimal;
use serde::Serialize;

/// Status an order is created with. Every later transition (payment
/// confirmation, fulfilment) belongs to the backend, not this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, awaiting payment confirmation.
    Pending,
}

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Grand total as computed at submission time: subtotal + shipping + tax.
    pub total_amount: Decimal,

    /// Initial status.
    pub status: OrderStatus,
}

/// Acknowledgement of a created order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOrder {
    /// Backend identifier of the order, used for line items and payment.
    pub id: String,
}

/// Payload for one order line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    /// Order the line belongs to.
    pub order_id: String,

    /// Product captured at time of purchase.
    pub product_id: String,

    /// Units purchased.
    pub quantity: u32,

    /// Price per unit at time of purchase.
    pub unit_price: Decimal,

    /// `unit_price × quantity`.
    pub total_price: Decimal,

    /// Artisan the line is attributed to.
    pub artisan_id: String,
}
