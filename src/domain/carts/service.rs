//! Cart aggregate.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::carts::{
    errors::CartsError,
    models::CartItem,
    repository::CartsRepository,
};

/// The buyer's in-memory cart, kept consistent with the remote cart store.
///
/// The aggregate has two effective states: empty (initial, and after any
/// load failure or [`reset`](Cart::reset)) and loaded. Errors never park the
/// cart in an error state; a failed load collapses back to empty.
///
/// All mutation goes through this type. It is constructed per buyer session
/// with the repository injected, so nothing about it is ambient and tests
/// swap the repository for a mock.
pub struct Cart {
    repository: Arc<dyn CartsRepository>,
    items: Vec<CartItem>,
    loaded: bool,
}

impl Cart {
    /// Create an empty cart over the given remote store.
    #[must_use]
    pub fn new(repository: Arc<dyn CartsRepository>) -> Self {
        Self {
            repository,
            items: Vec::new(),
            loaded: false,
        }
    }

    /// Replace local state with the remote cart.
    ///
    /// Never fails: a transport or auth failure is logged and leaves an
    /// empty cart, since an unauthenticated buyer has no cart to show.
    pub async fn load(&mut self) {
        match self.repository.fetch_cart().await {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
            }
            Err(error) => {
                warn!(%error, "cart load failed, showing empty cart");
                self.items.clear();
                self.loaded = false;
            }
        }
    }

    /// Add a product to the cart, then reload so server-computed fields win
    /// over anything known locally.
    ///
    /// # Errors
    ///
    /// Returns [`CartsError::LoginRequired`] when the session is missing,
    /// [`CartsError::InvalidQuantity`] for a zero quantity, or the remote
    /// failure otherwise.
    #[tracing::instrument(name = "carts.add", skip(self), err)]
    pub async fn add(&mut self, product_id: &str, quantity: u32) -> Result<(), CartsError> {
        if quantity < 1 {
            return Err(CartsError::InvalidQuantity);
        }

        self.repository.add_item(product_id, quantity).await?;
        self.load().await;

        Ok(())
    }

    /// Change a line's quantity, optimistically.
    ///
    /// The local line is patched first for responsiveness; if the remote
    /// update then fails, the patch is rolled back before the error is
    /// returned, so local and remote state never stay divergent.
    ///
    /// # Errors
    ///
    /// Returns [`CartsError::InvalidQuantity`] for quantities below 1,
    /// [`CartsError::ItemNotFound`] for an unknown line, or the remote
    /// failure (after rollback).
    #[tracing::instrument(name = "carts.update_quantity", skip(self), err)]
    pub async fn update_quantity(&mut self, item_id: &str, quantity: u32) -> Result<(), CartsError> {
        if quantity < 1 {
            return Err(CartsError::InvalidQuantity);
        }

        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| CartsError::ItemNotFound(item_id.to_string()))?;

        let previous = match self.items.get_mut(index) {
            Some(item) => {
                let previous = item.quantity;
                item.quantity = quantity;
                previous
            }
            None => return Err(CartsError::ItemNotFound(item_id.to_string())),
        };

        let result = self.repository.update_item_quantity(item_id, quantity).await;

        if let Err(error) = result {
            if let Some(item) = self.items.get_mut(index) {
                item.quantity = previous;
            }

            return Err(error.into());
        }

        Ok(())
    }

    /// Remove a line, optimistically.
    ///
    /// The line disappears locally first; if the remote delete fails it is
    /// restored at its original position before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CartsError::ItemNotFound`] for an unknown line, or the
    /// remote failure (after rollback).
    #[tracing::instrument(name = "carts.remove", skip(self), err)]
    pub async fn remove(&mut self, item_id: &str) -> Result<(), CartsError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| CartsError::ItemNotFound(item_id.to_string()))?;

        let removed = self.items.remove(index);

        let result = self.repository.remove_item(item_id).await;

        if let Err(error) = result {
            self.items.insert(index, removed);

            return Err(error.into());
        }

        Ok(())
    }

    /// Empty the cart remotely and locally. Used after a successful order.
    ///
    /// # Errors
    ///
    /// Returns the remote failure; local items are kept when the remote
    /// clear did not happen.
    #[tracing::instrument(name = "carts.clear", skip(self), err)]
    pub async fn clear(&mut self) -> Result<(), CartsError> {
        self.repository.clear().await?;
        self.items.clear();

        debug!("cart cleared");

        Ok(())
    }

    /// Drop local state without touching the remote store (sign-out path).
    pub fn reset(&mut self) {
        self.items.clear();
        self.loaded = false;
    }

    /// The current cart lines, in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Σ unit price × quantity over the current lines. Always derived, never
    /// stored.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the last load succeeded while authenticated.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
