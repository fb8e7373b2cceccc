//! # Request Handlers
//!
//! Axum request handlers for the preference relay.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{CartError, CartPayload, ErrorDetails, NormalizedError, PaymentError, PreferenceResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, field, instrument, warn, Span};

// =============================================================================
// Response Types
// =============================================================================

/// Error response
///
/// Client errors carry only `message`; server errors always add `details`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl From<NormalizedError> for ErrorResponse {
    fn from(err: NormalizedError) -> Self {
        Self {
            message: err.message,
            details: Some(err.details),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        PaymentError::InvalidCart(cart_err) => ErrorResponse {
            message: cart_err.to_string(),
            details: None,
        },
        other => ErrorResponse::from(NormalizedError::from(&other)),
    };

    (status, Json(body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "mp-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate a cart and create a checkout preference for it
#[instrument(skip_all, fields(order_id = field::Empty))]
pub async fn create_preference(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PreferenceResult>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        payment_error_to_response(CartError::MalformedBody(rejection.body_text()).into())
    })?;

    let payload = CartPayload::try_from(payload).map_err(|e| {
        warn!("Rejected request body: {}", e);
        payment_error_to_response(e.into())
    })?;

    if let Some(order_id) = payload.order_reference() {
        Span::current().record("order_id", order_id.as_str());
    }

    let cart = payload.validate().map_err(|e| {
        warn!("Rejected cart: {}", e);
        payment_error_to_response(e.into())
    })?;

    let back_urls = state.back_urls();

    let result = pay_core::create_preference(state.gateway.as_ref(), &cart, &back_urls)
        .await
        .map_err(|e| {
            error!(error = ?e, "Failed to create preference: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(result))
}
