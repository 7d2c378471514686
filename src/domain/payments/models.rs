//! Payment models.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A Kenyan mobile-money number: country code `254` followed by nine digits.
///
/// Parse-don't-validate: a value of this type has already passed the format
/// check, so nothing past the form boundary needs to re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Msisdn(String);

/// Rejection reason for a malformed mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsisdnError {
    /// The number does not match `254` + nine digits.
    #[error("phone number must be 254 followed by nine digits, e.g. 254712345678")]
    InvalidFormat,
}

impl FromStr for Msisdn {
    type Err = MsisdnError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();

        let valid = raw.len() == 12
            && raw.starts_with("254")
            && raw.bytes().all(|byte| byte.is_ascii_digit());

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(MsisdnError::InvalidFormat)
        }
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Msisdn {
    /// The number in wire form, e.g. `"254712345678"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Gateway verdict on an STK push request.
///
/// Acceptance means a payment prompt was pushed to the buyer's phone, not
/// that the payment completed; completion arrives through the backend's
/// payment callback, outside this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAck {
    /// The gateway accepted the request.
    Accepted {
        /// Message the gateway attached, shown to the buyer when present.
        message: Option<String>,
    },

    /// The gateway was reachable and said no.
    Rejected {
        /// Why the request was not accepted.
        reason: String,
    },
}
