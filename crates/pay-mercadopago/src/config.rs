//! # MercadoPago Configuration
//!
//! Configuration management for the MercadoPago integration.
//! The access token is loaded from the environment and never logged.

use pay_core::PaymentError;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::time::Duration;

/// Production API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.mercadopago.com";

/// Locale sent with every request
pub const DEFAULT_LOCALE: &str = "es-AR";

/// Upper bound for a single provider call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// MercadoPago API configuration
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    /// Private access token (APP_USR-... or TEST-...)
    pub access_token: SecretString,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Locale passed as `Accept-Language`
    pub locale: String,

    /// Request timeout
    pub timeout: Duration,
}

impl MercadoPagoConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `MERCADOPAGO_ACCESS_TOKEN`
    ///
    /// Optional:
    /// - `MERCADOPAGO_API_URL` (default: `https://api.mercadopago.com`)
    /// - `MERCADOPAGO_LOCALE` (default: `es-AR`)
    /// - `MERCADOPAGO_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PaymentError> {
        let access_token = lookup("MERCADOPAGO_ACCESS_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                PaymentError::Configuration("MERCADOPAGO_ACCESS_TOKEN not set".to_string())
            })?;

        let timeout = match lookup("MERCADOPAGO_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!(
                    "MERCADOPAGO_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(access_token);
        config.timeout = Duration::from_secs(timeout);
        if let Some(url) = lookup("MERCADOPAGO_API_URL") {
            config = config.with_api_base_url(url);
        }
        if let Some(locale) = lookup("MERCADOPAGO_LOCALE") {
            config.locale = locale;
        }

        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check if using sandbox credentials
    pub fn is_test_mode(&self) -> bool {
        self.access_token.expose_secret().starts_with("TEST-")
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint for preference creation
    pub fn preferences_url(&self) -> String {
        format!("{}/checkout/preferences", self.api_base_url)
    }
}
