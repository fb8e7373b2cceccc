//! # Cart Types
//!
//! Inbound cart payload and its validation.
//!
//! The payload is deserialized loosely ([`CartPayload`]) and then turned into
//! a [`ValidCart`] by [`CartPayload::validate`]. The first item that fails
//! aborts the whole cart; its raw JSON is echoed back in the error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const TITLE_REASON: &str = "title debe ser un texto no vacío";
const QUANTITY_REASON: &str = "quantity debe ser un número mayor a 0";
const UNIT_PRICE_REASON: &str = "unit_price debe ser un número mayor a 0";
const NOT_AN_OBJECT_REASON: &str = "el item debe ser un objeto";
const NOT_AN_OBJECT_BODY: &str = "se esperaba un objeto JSON";

/// Reasons a cart payload is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// `items` absent, not an array, or empty
    #[error("Se requiere un array 'items' no vacío")]
    MissingItems,

    /// One item broke a field constraint
    #[error("Item inválido ({reason}): {item}")]
    InvalidItem { reason: &'static str, item: String },

    /// Body was not a JSON object
    #[error("Cuerpo de la solicitud inválido: {0}")]
    MalformedBody(String),
}

/// Raw `POST /create_preference` body
///
/// Unknown fields are ignored. `pedidoId` and `datosEnvio` are accepted so
/// both client variants share one endpoint.
///
/// Build it from request JSON with [`CartPayload::try_from`], which only
/// accepts a JSON object. The derived `Deserialize` alone would also take a
/// positional array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartPayload {
    /// Line items, checked by [`CartPayload::validate`]
    #[serde(default)]
    pub items: Option<Value>,

    /// Client-side order reference
    #[serde(default, rename = "pedidoId")]
    pub order_id: Option<Value>,

    /// Shipping data. Accepted and ignored: the preference never carries it.
    #[serde(default, rename = "datosEnvio")]
    pub shipping: Option<Value>,
}

impl TryFrom<Value> for CartPayload {
    type Error = CartError;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        if !body.is_object() {
            return Err(CartError::MalformedBody(NOT_AN_OBJECT_BODY.to_string()));
        }
        serde_json::from_value(body).map_err(|e| CartError::MalformedBody(e.to_string()))
    }
}

impl CartPayload {
    /// Validate the payload into a non-empty list of well-formed items.
    pub fn validate(&self) -> Result<ValidCart, CartError> {
        let raw_items = match &self.items {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(CartError::MissingItems),
        };

        let items = raw_items
            .iter()
            .map(|raw| {
                CartItem::from_json(raw).map_err(|reason| CartError::InvalidItem {
                    reason,
                    item: raw.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidCart { items })
    }

    /// Order reference as text, for logging
    pub fn order_reference(&self) -> Option<String> {
        match self.order_id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A validated cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Display title, non-blank
    pub title: String,

    /// Units as sent by the client, strictly positive
    pub quantity: f64,

    /// Price per unit as sent by the client, strictly positive
    pub unit_price: f64,
}

impl CartItem {
    fn from_json(raw: &Value) -> Result<Self, &'static str> {
        let fields = raw.as_object().ok_or(NOT_AN_OBJECT_REASON)?;

        let title = fields
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .ok_or(TITLE_REASON)?;

        let quantity = fields
            .get("quantity")
            .and_then(Value::as_f64)
            .filter(|q| q.is_finite() && *q > 0.0)
            .ok_or(QUANTITY_REASON)?;

        let unit_price = fields
            .get("unit_price")
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or(UNIT_PRICE_REASON)?;

        Ok(Self {
            title: title.to_string(),
            quantity,
            unit_price,
        })
    }
}

/// A cart that passed validation: at least one item, all well-formed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCart {
    items: Vec<CartItem>,
}

impl ValidCart {
    /// Items in input order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total units across all lines
    pub fn item_count(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: Value) -> CartPayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_cart() {
        let cart = payload(json!({
            "items": [
                { "title": "Shirt", "quantity": 2, "unit_price": 19.999 },
                { "title": "Hat", "quantity": 1, "unit_price": 5 }
            ]
        }))
        .validate()
        .unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].title, "Shirt");
        assert_eq!(cart.items()[0].quantity, 2.0);
        assert_eq!(cart.items()[1].unit_price, 5.0);
        assert_eq!(cart.item_count(), 3.0);
    }

    #[test]
    fn test_missing_items() {
        let err = payload(json!({})).validate().unwrap_err();
        assert_eq!(err, CartError::MissingItems);
    }

    #[test]
    fn test_empty_items_mentions_non_empty() {
        let err = payload(json!({ "items": [] })).validate().unwrap_err();
        assert_eq!(err, CartError::MissingItems);
        assert!(err.to_string().contains("no vacío"));
    }

    #[test]
    fn test_items_not_an_array() {
        for items in [json!(null), json!("shirt"), json!({ "title": "Shirt" }), json!(3)] {
            let err = payload(json!({ "items": items })).validate().unwrap_err();
            assert_eq!(err, CartError::MissingItems);
        }
    }

    #[test]
    fn test_blank_title_rejected_with_item_json() {
        let err = payload(json!({
            "items": [{ "title": "", "quantity": 1, "unit_price": 5 }]
        }))
        .validate()
        .unwrap_err();

        let message = err.to_string();
        assert!(matches!(err, CartError::InvalidItem { reason: TITLE_REASON, .. }));
        assert!(message.contains(r#""title":"""#));
        assert!(message.contains(r#""unit_price":5"#));
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let err = payload(json!({
            "items": [{ "title": "   ", "quantity": 1, "unit_price": 5 }]
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, CartError::InvalidItem { reason: TITLE_REASON, .. }));
    }

    #[test]
    fn test_non_text_title_rejected() {
        let err = payload(json!({
            "items": [{ "title": 42, "quantity": 1, "unit_price": 5 }]
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, CartError::InvalidItem { reason: TITLE_REASON, .. }));
    }

    #[test]
    fn test_bad_quantities_rejected() {
        for quantity in [json!(0), json!(-1), json!("2"), json!(null), json!(-0.5)] {
            let err = payload(json!({
                "items": [{ "title": "Shirt", "quantity": quantity, "unit_price": 5 }]
            }))
            .validate()
            .unwrap_err();
            assert!(
                matches!(err, CartError::InvalidItem { reason: QUANTITY_REASON, .. }),
                "quantity {quantity} should be rejected"
            );
        }
    }

    #[test]
    fn test_fractional_quantity_kept_as_sent() {
        let cart = payload(json!({
            "items": [{ "title": "Cheese (kg)", "quantity": 1.5, "unit_price": 5 }]
        }))
        .validate()
        .unwrap();
        assert_eq!(cart.items()[0].quantity, 1.5);
        assert_eq!(cart.item_count(), 1.5);
    }

    #[test]
    fn test_invalid_item_echoed_in_client_order() {
        let body: Value =
            serde_json::from_str(r#"{"items":[{"unit_price":5,"title":"","quantity":1}]}"#).unwrap();

        let err = CartPayload::try_from(body).unwrap().validate().unwrap_err();

        assert!(err
            .to_string()
            .ends_with(r#"{"unit_price":5,"title":"","quantity":1}"#));
    }

    #[test]
    fn test_try_from_requires_object() {
        let item = json!({ "title": "Shirt", "quantity": 1, "unit_price": 5 });

        for body in [json!([[item.clone()]]), json!([item]), json!("cart"), json!(null)] {
            let err = CartPayload::try_from(body).unwrap_err();
            assert!(matches!(err, CartError::MalformedBody(_)));
        }
    }

    #[test]
    fn test_try_from_object() {
        let body = CartPayload::try_from(json!({
            "items": [{ "title": "Shirt", "quantity": 1, "unit_price": 5 }],
            "pedidoId": "ord-1"
        }))
        .unwrap();

        assert_eq!(body.order_reference().as_deref(), Some("ord-1"));
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_bad_prices_rejected() {
        for price in [json!(0), json!(-0.5), json!("10"), json!(null)] {
            let err = payload(json!({
                "items": [{ "title": "Shirt", "quantity": 1, "unit_price": price }]
            }))
            .validate()
            .unwrap_err();
            assert!(matches!(err, CartError::InvalidItem { reason: UNIT_PRICE_REASON, .. }));
        }
    }

    #[test]
    fn test_missing_price_rejected() {
        let err = payload(json!({ "items": [{ "title": "Shirt", "quantity": 1 }] }))
            .validate()
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidItem { reason: UNIT_PRICE_REASON, .. }));
    }

    #[test]
    fn test_first_invalid_item_is_reported() {
        let err = payload(json!({
            "items": [
                { "title": "Shirt", "quantity": 1, "unit_price": 5 },
                { "title": "Hat", "quantity": 0, "unit_price": 5 },
                { "title": "", "quantity": 1, "unit_price": 5 }
            ]
        }))
        .validate()
        .unwrap_err();

        match err {
            CartError::InvalidItem { reason, item } => {
                assert_eq!(reason, QUANTITY_REASON);
                assert!(item.contains("Hat"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_object_item_rejected() {
        let err = payload(json!({ "items": ["Shirt"] })).validate().unwrap_err();
        assert_eq!(
            err,
            CartError::InvalidItem {
                reason: NOT_AN_OBJECT_REASON,
                item: "\"Shirt\"".to_string()
            }
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let body = payload(json!({
            "items": [{ "title": "Shirt", "quantity": 1, "unit_price": 5, "id": "sku-1" }],
            "pedidoId": 1234,
            "datosEnvio": { "calle": "Av. Siempre Viva 742" },
            "coupon": "ABC"
        }));

        assert_eq!(body.order_reference().as_deref(), Some("1234"));
        assert!(body.shipping.is_some());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_order_reference() {
        assert_eq!(
            payload(json!({ "pedidoId": "ord-9" })).order_reference().as_deref(),
            Some("ord-9")
        );
        assert_eq!(payload(json!({ "pedidoId": "" })).order_reference(), None);
        assert_eq!(payload(json!({})).order_reference(), None);
    }
}
