//! App Context

use std::sync::Arc;

use crate::{
    api::{ApiClient, ApiError},
    auth::{HttpAuthService, service::AuthService},
    config::StoreConfig,
    domain::{
        carts::{
            Cart,
            repository::{CartsRepository, HttpCartsRepository},
        },
        checkout::CheckoutFlow,
        orders::{HttpOrdersRepository, repository::OrdersRepository},
        payments::{HttpPaymentsGateway, gateway::PaymentsGateway},
    },
};

/// Wired-up services for one storefront backend.
///
/// The cart aggregate and checkout flow are not held here; they carry
/// per-session state and are constructed per buyer via [`AppContext::cart`]
/// and [`AppContext::checkout`].
#[derive(Clone)]
pub struct AppContext {
    config: StoreConfig,
    /// Session probe.
    pub auth: Arc<dyn AuthService>,
    /// Remote cart store.
    pub carts: Arc<dyn CartsRepository>,
    /// Remote order service.
    pub orders: Arc<dyn OrdersRepository>,
    /// Payment gateway.
    pub payments: Arc<dyn PaymentsGateway>,
}

impl AppContext {
    /// Build the context from store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: StoreConfig) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(&config)?);

        Ok(Self {
            auth: Arc::new(HttpAuthService::new(Arc::clone(&api))),
            carts: Arc::new(HttpCartsRepository::new(Arc::clone(&api))),
            orders: Arc::new(HttpOrdersRepository::new(Arc::clone(&api))),
            payments: Arc::new(HttpPaymentsGateway::new(api)),
            config,
        })
    }

    /// The configuration this context was built from.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// A fresh cart aggregate for the current buyer session.
    pub fn cart(&self) -> Cart {
        Cart::new(Arc::clone(&self.carts))
    }

    /// A fresh checkout flow for the current buyer session.
    pub fn checkout(&self) -> CheckoutFlow {
        CheckoutFlow::new(
            self.config.clone(),
            Arc::clone(&self.orders),
            Arc::clone(&self.payments),
        )
    }
}
