//! # Routes
//!
//! Axum router configuration for the preference relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - POST /create_preference - Validate cart and return the checkout URL
///   - GET  /health            - Health check
///   - GET  /                  - Health check
pub fn create_router(state: AppState) -> Router {
    // Browser storefronts on any origin may call us
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/create_preference", post(handlers::create_preference))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
