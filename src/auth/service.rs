//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    auth::models::Session,
};

/// Session probe backed by the store's auth endpoint.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: Arc<ApiClient>,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn session(&self) -> Result<Session, ApiError> {
        let body = self.api.get("/auth/session").await?;

        Ok(serde_json::from_value(body).unwrap_or_else(|_| Session::anonymous()))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Fetch the current session. An unrecognized body is treated as an
    /// anonymous session rather than an error.
    async fn session(&self) -> Result<Session, ApiError>;
}
