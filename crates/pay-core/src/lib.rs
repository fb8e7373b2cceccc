//! # pay-core
//!
//! Core types and traits for the mp-checkout preference relay.
//!
//! This crate provides:
//! - `CartPayload` and `ValidCart` for cart validation
//! - `PreferenceRequest`, `BackUrls` and `PreferenceResult` for the provider call
//! - `PreferenceGateway` trait for implementing payment providers
//! - `PaymentError` and `NormalizedError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{create_preference, BackUrls, CartPayload};
//!
//! let payload = CartPayload::try_from(serde_json::from_str::<serde_json::Value>(body)?)?;
//! let cart = payload.validate()?;
//!
//! let urls = BackUrls::from_base("https://shop.example.com");
//! let result = create_preference(gateway.as_ref(), &cart, &urls).await?;
//!
//! // Redirect the payer to result.init_point
//! ```

pub mod cart;
pub mod error;
pub mod gateway;
pub mod preference;

// Re-exports for convenience
pub use cart::{CartError, CartItem, CartPayload, ValidCart};
pub use error::{ErrorDetails, NormalizedError, PaymentError, PaymentResult, GENERIC_ERROR_MESSAGE};
pub use gateway::{create_preference, BoxedPreferenceGateway, PreferenceGateway};
pub use preference::{
    normalize_base_url, round_price, BackUrls, PreferenceItem, PreferenceRequest,
    PreferenceResult,
};
