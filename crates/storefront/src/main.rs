//! VIZIFIT storefront - JSON API server.
//!
//! Serves the storefront API on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum JSON API consumed by the web client
//! - Static in-process catalog (no product database)
//! - Upstream AI gateway for custom design generation
//! - Hosted identity provider for accounts and tokens
//! - File-backed per-user order and design history

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vizifit_storefront::config::StorefrontConfig;
use vizifit_storefront::state::AppState;
use vizifit_storefront::app;

#[tokio::main]
async fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vizifit_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    let addr = config.socket_addr();

    let state = AppState::new(config);
    let app = app(state);

    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
