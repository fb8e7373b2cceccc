//! # pay-api
//!
//! HTTP API layer for mp-checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The `POST /create_preference` endpoint
//! - Startup configuration and shared state
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create_preference` | Validate cart, return `init_point` |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
