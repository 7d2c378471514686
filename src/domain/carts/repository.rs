//! Remote cart store.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError},
    domain::carts::models::{CartItem, normalize_cart_payload},
};

/// HTTP-backed [`CartsRepository`] against the store's cart endpoints.
#[derive(Debug, Clone)]
pub struct HttpCartsRepository {
    api: Arc<ApiClient>,
}

impl HttpCartsRepository {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartsRepository for HttpCartsRepository {
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        let payload = self.api.get("/cart").await?;
        let items = normalize_cart_payload(&payload);

        debug!(count = items.len(), "fetched cart");

        Ok(items)
    }

    async fn add_item(&self, product_id: &str, quantity: u32) -> Result<(), ApiError> {
        self.api
            .post(
                "/cart/items",
                &json!({ "productId": product_id, "quantity": quantity }),
            )
            .await?;

        Ok(())
    }

    async fn update_item_quantity(&self, item_id: &str, quantity: u32) -> Result<(), ApiError> {
        self.api
            .put(
                &format!("/cart/items/{item_id}"),
                &json!({ "quantity": quantity }),
            )
            .await?;

        Ok(())
    }

    async fn remove_item(&self, item_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/cart/items/{item_id}")).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        self.api.delete("/cart").await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Fetch the buyer's cart, already normalized to a flat list of lines.
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError>;

    /// Add a product line. The created line is not consumed; callers reload
    /// the cart so server-computed fields win.
    async fn add_item(&self, product_id: &str, quantity: u32) -> Result<(), ApiError>;

    /// Change the quantity of an existing line.
    async fn update_item_quantity(&self, item_id: &str, quantity: u32) -> Result<(), ApiError>;

    /// Delete a single line.
    async fn remove_item(&self, item_id: &str) -> Result<(), ApiError>;

    /// Delete every line in the cart.
    async fn clear(&self) -> Result<(), ApiError>;
}
