//! # mp-checkout
//!
//! Stateless relay from shopping carts to MercadoPago checkout preferences.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export MERCADOPAGO_ACCESS_TOKEN=APP_USR-...
//! export BASE_URL=https://shop.example.com
//!
//! # Run the server
//! mp-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let json_logs = std::env::var("ENVIRONMENT").is_ok_and(|env| env == "production");
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json()))
        .with((!json_logs).then(|| fmt::layer()))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Refuse to start without a usable configuration
    let state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            error!("Startup aborted: {:#}", e);
            return Err(e);
        }
    };

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());
    info!("Redirect base URL: {}", state.config.base_url);

    let app = routes::create_router(state);

    info!("mp-checkout starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Checkout: POST http://{}/create_preference", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mp-checkout stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

fn print_banner() {
    println!(
        r#"
  mp-checkout
  ━━━━━━━━━━━━━━━━━━━━━━━
  Cart → MercadoPago preference relay
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
