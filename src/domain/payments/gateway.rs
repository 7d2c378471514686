//! M-Pesa payment gateway client.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError},
    domain::payments::{
        errors::PaymentsError,
        models::{Msisdn, PaymentAck},
    },
};

/// HTTP-backed [`PaymentsGateway`] against the store's M-Pesa STK push
/// endpoint.
#[derive(Debug, Clone)]
pub struct HttpPaymentsGateway {
    api: Arc<ApiClient>,
}

impl HttpPaymentsGateway {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PaymentsGateway for HttpPaymentsGateway {
    async fn initiate_stk_push(
        &self,
        order_id: &str,
        phone: &Msisdn,
    ) -> Result<PaymentAck, PaymentsError> {
        let body = json!({ "orderId": order_id, "phoneNumber": phone.as_str() });

        debug!(order_id, "initiating stk push");

        match self.api.post("/payments/mpesa/stk-push", &body).await {
            Ok(response) => Ok(interpret_ack(&response)),
            Err(ApiError::Unauthorized) => Err(PaymentsError::LoginRequired),
            // A reachable gateway that rejects the request is a business
            // verdict, not a failure of the call.
            Err(ApiError::Service { message, .. }) => Ok(PaymentAck::Rejected { reason: message }),
            Err(error) => Err(PaymentsError::Unavailable(error)),
        }
    }
}

#[automock]
#[async_trait]
pub trait PaymentsGateway: Send + Sync {
    /// Push a payment prompt for the given order to the buyer's phone.
    async fn initiate_stk_push(
        &self,
        order_id: &str,
        phone: &Msisdn,
    ) -> Result<PaymentAck, PaymentsError>;
}

/// Read the gateway's verdict out of a 2xx body: a true `success` flag or a
/// `message` field means the prompt went out; anything else is a rejection,
/// with the reason drawn from `error` when present.
fn interpret_ack(response: &Value) -> PaymentAck {
    let success = response.get("success").and_then(Value::as_bool);
    let message = response
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned);

    if success.unwrap_or(false) || message.is_some() {
        return PaymentAck::Accepted { message };
    }

    let reason = response
        .get("error")
        .and_then(Value::as_str)
        .map_or_else(
            || "payment request was not accepted".to_string(),
            str::to_owned,
        );

    PaymentAck::Rejected { reason }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_flag_means_accepted() {
        let ack = interpret_ack(&json!({ "success": true }));

        assert_eq!(ack, PaymentAck::Accepted { message: None });
    }

    #[test]
    fn message_alone_means_accepted() {
        let ack = interpret_ack(&json!({ "message": "STK push sent" }));

        assert_eq!(
            ack,
            PaymentAck::Accepted {
                message: Some("STK push sent".to_string())
            }
        );
    }

    #[test]
    fn error_field_means_rejected() {
        let ack = interpret_ack(&json!({ "success": false, "error": "insufficient funds" }));

        assert_eq!(
            ack,
            PaymentAck::Rejected {
                reason: "insufficient funds".to_string()
            }
        );
    }

    #[test]
    fn silent_body_means_rejected() {
        let ack = interpret_ack(&json!({}));

        assert!(matches!(ack, PaymentAck::Rejected { .. }));
    }
}
