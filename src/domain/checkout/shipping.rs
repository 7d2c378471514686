//! Shipping details.

use thiserror::Error;

/// Shipping details collected in the first checkout stage.
///
/// Held only inside the checkout flow; the backend order keeps its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingInfo {
    /// Recipient's full name.
    pub full_name: String,
    /// Contact email, echoed on the confirmation stage.
    pub email: String,
    /// Contact phone for the courier.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

/// Rejection reason for incomplete shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl ShippingInfo {
    /// Check that every field carries a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ShippingError> {
        let fields = [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("postal code", &self.postal_code),
            ("country", &self.country),
        ];

        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(ShippingError::MissingField(label));
            }
        }

        Ok(())
    }
}
