//! # Preference Types
//!
//! The checkout descriptor sent to the payment provider, and what comes back.

use crate::cart::{CartItem, ValidCart};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places the provider accepts for unit prices
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Round a price to [`PRICE_DECIMAL_PLACES`], halves away from zero.
///
/// Works on the shortest decimal form of the float, so `1.005` becomes
/// `1.01` rather than `1.00`.
pub fn round_price(amount: f64) -> f64 {
    amount
        .to_string()
        .parse::<Decimal>()
        .ok()
        .map(|d| {
            d.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| (amount * 100.0).round() / 100.0)
}

/// Strip trailing slashes so suffixes can be appended safely
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Where the provider sends the payer after checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    /// Build the three redirect targets from a public base URL
    pub fn from_base(base_url: &str) -> Self {
        let base = normalize_base_url(base_url);
        Self {
            success: format!("{}/success", base),
            failure: format!("{}/failure", base),
            pending: format!("{}/pending", base),
        }
    }
}

/// One line of a preference, price already rounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl From<&CartItem> for PreferenceItem {
    fn from(item: &CartItem) -> Self {
        Self {
            title: item.title.clone(),
            quantity: item.quantity,
            unit_price: round_price(item.unit_price),
        }
    }
}

/// Body of the provider's "create preference" call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub back_urls: BackUrls,
}

impl PreferenceRequest {
    /// Translate a validated cart, keeping item order
    pub fn build(cart: &ValidCart, back_urls: &BackUrls) -> Self {
        Self {
            items: cart.items().iter().map(PreferenceItem::from).collect(),
            back_urls: back_urls.clone(),
        }
    }
}

/// What the caller gets on success: just the hosted checkout URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceResult {
    pub init_point: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartPayload;
    use serde_json::json;

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(19.999), 20.0);
        assert_eq!(round_price(10.0), 10.0);
        assert_eq!(round_price(0.125), 0.13);
        assert_eq!(round_price(1.005), 1.01);
        assert_eq!(round_price(99.994), 99.99);
    }

    #[test]
    fn test_back_urls() {
        let urls = BackUrls::from_base("https://shop.example.com");

        assert_eq!(urls.success, "https://shop.example.com/success");
        assert_eq!(urls.failure, "https://shop.example.com/failure");
        assert_eq!(urls.pending, "https://shop.example.com/pending");
    }

    #[test]
    fn test_back_urls_trailing_slash() {
        assert_eq!(
            BackUrls::from_base("https://shop.example.com/"),
            BackUrls::from_base("https://shop.example.com")
        );
        assert_eq!(
            BackUrls::from_base("http://localhost:3000//").success,
            "http://localhost:3000/success"
        );
    }

    #[test]
    fn test_build_keeps_order_and_rounds() {
        let cart = serde_json::from_value::<CartPayload>(json!({
            "items": [
                { "title": "Shirt", "quantity": 2, "unit_price": 19.999 },
                { "title": "Hat", "quantity": 1, "unit_price": 7.5 },
                { "title": "Socks", "quantity": 3, "unit_price": 2.344 }
            ]
        }))
        .unwrap()
        .validate()
        .unwrap();

        let request = PreferenceRequest::build(&cart, &BackUrls::from_base("https://shop.example.com/"));

        let titles: Vec<_> = request.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Shirt", "Hat", "Socks"]);

        let prices: Vec<_> = request.items.iter().map(|i| i.unit_price).collect();
        assert_eq!(prices, [20.0, 7.5, 2.34]);

        assert_eq!(
            serde_json::to_value(&request).unwrap()["back_urls"],
            json!({
                "success": "https://shop.example.com/success",
                "failure": "https://shop.example.com/failure",
                "pending": "https://shop.example.com/pending"
            })
        );
    }

    #[test]
    fn test_result_serializes_only_init_point() {
        let result = PreferenceResult {
            init_point: "https://pay.example/abc".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "init_point": "https://pay.example/abc" })
        );
    }
}
