//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup and read-only afterwards.

use anyhow::Context;
use pay_core::{normalize_base_url, BackUrls, BoxedPreferenceGateway};
use pay_mercadopago::MercadoPagoGateway;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Listening port (not configurable)
pub const PORT: u16 = 8080;

/// Public base URL used when `BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for redirect targets, without trailing slash
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let host = host
            .parse::<IpAddr>()
            .with_context(|| format!("HOST is not an IP address: {}", host))?;

        let base_url = lookup("BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            host,
            port: PORT,
            base_url: normalize_base_url(base_url.trim()).to_string(),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider
    pub gateway: BoxedPreferenceGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by MercadoPago
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let gateway = MercadoPagoGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize MercadoPago: {}", e))?;

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create state around an existing gateway
    pub fn with_gateway(config: AppConfig, gateway: BoxedPreferenceGateway) -> Self {
        Self { gateway, config }
    }

    /// Redirect targets, derived from the configured base URL
    pub fn back_urls(&self) -> BackUrls {
        BackUrls::from_base(&self.config.base_url)
    }
}
