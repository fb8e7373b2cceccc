//! # Payment Error Types
//!
//! Typed error handling for the preference relay.
//! All checkout operations return `Result<T, PaymentError>`.
//!
//! Provider failures are kept as variants (`Transport`, `Provider`,
//! `UnexpectedResponse`) so the outward [`NormalizedError`] can be
//! assembled by pattern matching instead of probing an untrusted shape.

use crate::cart::CartError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message returned when a failure carries no usable description
pub const GENERIC_ERROR_MESSAGE: &str = "Error al crear la preferencia de pago";

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing access token, invalid client setup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cart payload rejected by the validator
    #[error(transparent)]
    InvalidCart(#[from] CartError),

    /// The provider could not be reached (connect, TLS, timeout)
    #[error("Network error: {message}")]
    Transport {
        message: String,
        cause: Option<String>,
    },

    /// The provider answered with a non-success HTTP status
    #[error("Provider error [{provider}]: HTTP {status}")]
    Provider {
        provider: String,
        status: u16,
        body: Option<Value>,
    },

    /// The provider answered 2xx but the body lacked what we need
    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    ///
    /// Only cart rejections are the caller's fault. Everything else,
    /// including upstream 4xx answers, is reported as a server error.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidCart(_) => 400,
            PaymentError::Configuration(_)
            | PaymentError::Transport { .. }
            | PaymentError::Provider { .. }
            | PaymentError::UnexpectedResponse(_) => 500,
        }
    }

    /// Build a provider error from a status code and raw response text.
    ///
    /// JSON bodies are kept structured; anything else is kept as a string.
    pub fn from_provider_response(provider: impl Into<String>, status: u16, body: &str) -> Self {
        let body = if body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.to_string())),
            )
        };

        PaymentError::Provider {
            provider: provider.into(),
            status,
            body,
        }
    }
}

/// Result type alias for checkout operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Error body sent to callers on a server-side failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedError {
    /// Human readable summary, never empty
    pub message: String,
    /// Best-effort structured detail
    pub details: ErrorDetails,
}

/// Optional detail fields; absent fields are omitted from the JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_response: Option<Value>,
}

impl From<&PaymentError> for NormalizedError {
    fn from(err: &PaymentError) -> Self {
        match err {
            PaymentError::Provider { status, body, .. } => {
                let message = body
                    .as_ref()
                    .and_then(|b| text_field(b, "message").or_else(|| text_field(b, "error")))
                    .unwrap_or(GENERIC_ERROR_MESSAGE)
                    .to_string();

                Self {
                    message,
                    details: ErrorDetails {
                        status: Some(*status),
                        cause: body.as_ref().and_then(|b| b.get("cause")).cloned(),
                        api_response: body.clone(),
                    },
                }
            }
            PaymentError::Transport { message, cause } => Self {
                message: non_empty_or_generic(message),
                details: ErrorDetails {
                    cause: cause.clone().map(Value::String),
                    ..ErrorDetails::default()
                },
            },
            PaymentError::UnexpectedResponse(_) | PaymentError::InvalidCart(_) => Self {
                message: err.to_string(),
                details: ErrorDetails::default(),
            },
            PaymentError::Configuration(_) => Self {
                message: GENERIC_ERROR_MESSAGE.to_string(),
                details: ErrorDetails::default(),
            },
        }
    }
}

fn text_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn non_empty_or_generic(message: &str) -> String {
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}
