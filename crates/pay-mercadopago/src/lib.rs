//! # pay-mercadopago
//!
//! MercadoPago preference gateway for mp-checkout.
//!
//! Implements [`pay_core::PreferenceGateway`] on top of the
//! `POST /checkout/preferences` endpoint. The payer is sent to the returned
//! `init_point` to complete payment on MercadoPago's hosted page.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_mercadopago::MercadoPagoGateway;
//! use pay_core::{create_preference, BackUrls};
//!
//! // Create gateway from environment (MERCADOPAGO_ACCESS_TOKEN)
//! let gateway = MercadoPagoGateway::from_env()?;
//!
//! let urls = BackUrls::from_base("https://shop.example.com");
//! let result = create_preference(&gateway, &cart, &urls).await?;
//!
//! // Redirect user to result.init_point
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::MercadoPagoGateway;
pub use config::MercadoPagoConfig;
