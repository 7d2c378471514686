//! Cart models and payload normalization.
//!
//! The cart endpoint does not commit to one response shape: depending on the
//! backend build it answers with a bare list, or with the list wrapped under
//! an `items`, `cart_items` or `data` key. [`normalize_cart_payload`] is the
//! single place that tolerance lives; everything past it works with
//! [`CartItem`] values only.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::money;

/// One product line in the buyer's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Cart-entry identifier, distinct from the product identifier.
    pub id: String,

    /// Identifier of the product this line holds.
    pub product_id: String,

    /// Product title at the time the line was added.
    pub title: String,

    /// Price per unit, as computed by the backend when the line was added.
    pub unit_price: Decimal,

    /// Number of units. Never below 1; removal is the only way a line
    /// disappears.
    pub quantity: u32,

    /// Product image, when the backend sent one.
    pub image_url: Option<String>,

    /// Artisan who sells the product, when the backend sent one.
    pub artisan_id: Option<String>,
}

impl CartItem {
    /// Price of the whole line.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn from_value(value: &Value) -> Option<Self> {
        // A line without an entry id cannot be updated or removed, so it is
        // dropped rather than surfaced half-usable.
        let id = string_field(value, &["id", "cart_item_id", "cartItemId"])?;

        Some(Self {
            id,
            product_id: string_field(value, &["product_id", "productId"]).unwrap_or_default(),
            title: string_field(value, &["title", "name"]).unwrap_or_default(),
            unit_price: amount_field(value, &["unit_price", "unitPrice", "price"]),
            quantity: quantity_field(value),
            image_url: string_field(value, &["image_url", "imageUrl"]),
            artisan_id: string_field(value, &["artisan_id", "artisanId"]),
        })
    }
}

/// Normalize whatever the cart endpoint answered into a flat list of lines.
///
/// Recognizes a bare array and the `items` / `cart_items` / `data` wrappers;
/// any other shape yields an empty cart. Entries that cannot be read as a
/// cart line are skipped.
pub fn normalize_cart_payload(payload: &Value) -> Vec<CartItem> {
    let entries = match payload {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(_) => ["items", "cart_items", "data"]
            .iter()
            .find_map(|key| payload.get(key).and_then(Value::as_array))
            .map_or(&[][..], Vec::as_slice),
        _ => &[],
    };

    entries.iter().filter_map(CartItem::from_value).collect()
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| value.get(key).and_then(wire_string))
}

fn wire_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn amount_field(value: &Value, keys: &[&str]) -> Decimal {
    keys.iter()
        .find_map(|key| value.get(key))
        .map_or(Decimal::ZERO, money::coerce_amount)
}

fn quantity_field(value: &Value) -> u32 {
    let quantity = ["quantity", "qty"]
        .iter()
        .find_map(|key| value.get(key))
        .map_or(1, |raw| match raw {
            Value::Number(number) => number
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(1),
            Value::String(text) => text.trim().parse().unwrap_or(1),
            _ => 1,
        });

    quantity.max(1)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn line(id: &str, price: f64, quantity: u32) -> Value {
        json!({ "id": id, "product_id": "p1", "title": "Kiondo basket", "unit_price": price, "quantity": quantity })
    }

    #[test]
    fn normalizes_bare_list() {
        let items = normalize_cart_payload(&json!([line("c1", 45.0, 1)]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "c1");
        assert_eq!(items[0].unit_price, Decimal::new(45, 0));
    }

    #[test]
    fn normalizes_items_wrapper() {
        let items = normalize_cart_payload(&json!({ "items": [line("c1", 45.0, 1)] }));

        assert_eq!(items.len(), 1);
    }

    #[test]
    fn normalizes_cart_items_wrapper() {
        let items = normalize_cart_payload(&json!({ "cart_items": [line("c1", 45.0, 1)] }));

        assert_eq!(items.len(), 1);
    }

    #[test]
    fn normalizes_data_wrapper() {
        let items = normalize_cart_payload(&json!({ "data": [line("c1", 45.0, 1)] }));

        assert_eq!(items.len(), 1);
    }

    #[test]
    fn unrecognized_shape_yields_empty_cart() {
        assert!(normalize_cart_payload(&json!({ "lines": [line("c1", 45.0, 1)] })).is_empty());
        assert!(normalize_cart_payload(&json!("nonsense")).is_empty());
        assert!(normalize_cart_payload(&Value::Null).is_empty());
    }

    #[test]
    fn accepts_camel_case_fields_and_numeric_ids() {
        let items = normalize_cart_payload(&json!([
            { "id": 7, "productId": 31, "title": "Beaded collar", "unitPrice": "120.00", "quantity": "2", "artisanId": 9 }
        ]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "7");
        assert_eq!(items[0].product_id, "31");
        assert_eq!(items[0].unit_price, Decimal::new(120, 0));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].artisan_id.as_deref(), Some("9"));
    }

    #[test]
    fn entry_without_id_is_skipped() {
        let items = normalize_cart_payload(&json!([
            { "product_id": "p1", "quantity": 1 },
            line("c2", 45.0, 1),
        ]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "c2");
    }

    #[test]
    fn garbage_price_collapses_to_zero() {
        let items = normalize_cart_payload(&json!([
            { "id": "c1", "unit_price": "free!", "quantity": 1 }
        ]));

        assert_eq!(items[0].unit_price, Decimal::ZERO);
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let items = normalize_cart_payload(&json!([
            { "id": "c1", "quantity": 0 },
            { "id": "c2" },
        ]));

        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[1].quantity, 1);
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        let item = CartItem {
            id: "c1".into(),
            product_id: "p1".into(),
            title: "Soapstone dish".into(),
            unit_price: Decimal::new(1205, 1),
            quantity: 3,
            image_url: None,
            artisan_id: None,
        };

        assert_eq!(item.line_total(), Decimal::new(3615, 1));
    }
}
