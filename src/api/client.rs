//! JSON-over-HTTPS client for the store backend.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::{api::errors::ApiError, config::StoreConfig};

/// Shared HTTP client for every store service.
///
/// Holds one [`reqwest::Client`] with the session cookie jar enabled, so a
/// login performed against the backend carries over to every subsequent call,
/// and applies the configured request timeout to each request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Build a client from the store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &StoreConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// `GET` a path and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.execute("GET", path, self.http.get(self.url(path)))
            .await
    }

    /// `POST` a JSON body to a path and decode the response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute("POST", path, self.http.post(self.url(path)).json(body))
            .await
    }

    /// `PUT` a JSON body to a path and decode the response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.execute("PUT", path, self.http.put(self.url(path)).json(body))
            .await
    }

    /// `DELETE` a path.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute("DELETE", path, self.http.delete(self.url(path)))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        debug!(method, path, "store api request");

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);

            return Err(ApiError::Service {
                status: status.as_u16(),
                message: failure_message(&body, status),
            });
        }

        let text = response.text().await?;

        // Acknowledgement endpoints may answer with an empty body.
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull a failure message out of a non-2xx body, preferring the `message`
/// field, then `error`, then the HTTP status itself.
fn failure_message(body: &Value, status: StatusCode) -> String {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map_or_else(
            || format!("request failed with status {status}"),
            str::to_owned,
        )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_message_prefers_message_field() {
        let body = json!({ "message": "out of stock", "error": "ignored" });

        assert_eq!(
            failure_message(&body, StatusCode::BAD_REQUEST),
            "out of stock"
        );
    }

    #[test]
    fn failure_message_falls_back_to_error_field() {
        let body = json!({ "error": "cart not found" });

        assert_eq!(
            failure_message(&body, StatusCode::NOT_FOUND),
            "cart not found"
        );
    }

    #[test]
    fn failure_message_falls_back_to_status() {
        assert_eq!(
            failure_message(&Value::Null, StatusCode::INTERNAL_SERVER_ERROR),
            "request failed with status 500 Internal Server Error"
        );
    }
}
