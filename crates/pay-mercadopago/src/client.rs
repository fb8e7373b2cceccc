//! # MercadoPago Preferences
//!
//! Implementation of the MercadoPago "create preference" API.
//! One POST per checkout, no retries; the hosted page URL (`init_point`)
//! is the only field read back.

use crate::config::MercadoPagoConfig;
use async_trait::async_trait;
use pay_core::{
    PaymentError, PaymentResult, PreferenceGateway, PreferenceRequest, PreferenceResult,
};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "mercadopago";

/// MercadoPago preference gateway
///
/// Holds a single `reqwest::Client`, shared by every request.
pub struct MercadoPagoGateway {
    config: MercadoPagoConfig,
    client: Client,
}

impl MercadoPagoGateway {
    /// Create a new gateway
    pub fn new(config: MercadoPagoConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = MercadoPagoConfig::from_env()?;
        Self::new(config)
    }

    /// Read-only view of the active configuration
    pub fn config(&self) -> &MercadoPagoConfig {
        &self.config
    }
}

#[async_trait]
impl PreferenceGateway for MercadoPagoGateway {
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    async fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> PaymentResult<PreferenceResult> {
        let url = self.config.preferences_url();
        let idempotency_key = Uuid::new_v4().to_string();

        debug!(
            "Creating MercadoPago preference: {} items, idempotency_key={}",
            request.items.len(),
            idempotency_key
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.access_token.expose_secret())
            .header(ACCEPT_LANGUAGE, self.config.locale.as_str())
            .header("X-Idempotency-Key", idempotency_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            error!("MercadoPago API error: status={}, body={}", status, body);
            return Err(PaymentError::from_provider_response(
                PROVIDER,
                status.as_u16(),
                &body,
            ));
        }

        let created: PreferenceResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::UnexpectedResponse(format!(
                "Failed to parse MercadoPago response: {}",
                e
            ))
        })?;

        let init_point = created
            .init_point
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                PaymentError::UnexpectedResponse(
                    "MercadoPago response has no init_point".to_string(),
                )
            })?;

        info!(
            "Created MercadoPago preference: id={}",
            created.id.as_deref().unwrap_or("unknown")
        );

        Ok(PreferenceResult { init_point })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

fn transport_error(err: reqwest::Error) -> PaymentError {
    let cause = std::error::Error::source(&err).map(|source| source.to_string());
    let message = if err.is_timeout() {
        format!("Timed out waiting for MercadoPago: {}", err)
    } else {
        err.to_string()
    };

    PaymentError::Transport { message, cause }
}

// =============================================================================
// MercadoPago API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    init_point: Option<String>,
}
