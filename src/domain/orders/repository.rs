//! Remote order service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError},
    domain::orders::{
        errors::OrdersError,
        models::{CreatedOrder, NewOrder, NewOrderItem},
    },
};

/// HTTP-backed [`OrdersRepository`] against the store's order endpoints.
#[derive(Debug, Clone)]
pub struct HttpOrdersRepository {
    api: Arc<ApiClient>,
}

impl HttpOrdersRepository {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersRepository for HttpOrdersRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, OrdersError> {
        let body = serde_json::to_value(order).map_err(ApiError::from)?;
        let response = self.api.post("/orders", &body).await?;

        let created = created_order_from_value(&response).ok_or(OrdersError::MissingOrderId)?;

        debug!(order_id = %created.id, "created order");

        Ok(created)
    }

    async fn create_order_item(&self, item: &NewOrderItem) -> Result<(), OrdersError> {
        let body = serde_json::to_value(item).map_err(ApiError::from)?;
        self.api.post("/orders/items", &body).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Create an order and return its backend identifier.
    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, OrdersError>;

    /// Append one line to an existing order.
    async fn create_order_item(&self, item: &NewOrderItem) -> Result<(), OrdersError>;
}

/// The order service answers with either `{id, ...}` or `{order: {id, ...}}`;
/// both shapes are accepted, and the id may be a string or a number.
fn created_order_from_value(value: &Value) -> Option<CreatedOrder> {
    let record = value.get("order").unwrap_or(value);

    let id = match record.get("id")? {
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    Some(CreatedOrder { id })
}
