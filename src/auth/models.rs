//! Session models.

use serde::Deserialize;
use serde_json::Value;

/// Snapshot of the buyer's session as reported by the auth service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// Whether the backend considers the session cookie valid.
    #[serde(default)]
    pub authenticated: bool,

    /// Opaque user record, passed through for display. The backend does not
    /// commit to a shape here.
    #[serde(default)]
    pub user: Option<Value>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
