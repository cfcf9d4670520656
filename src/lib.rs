//! # CodeBuilder Worker
//!
//! A code generation service producing batches of unique, validated codes such as
//! coupon or voucher codes:
//!
//! - **Configurable code space**: alphabet, length, prefix/suffix, or a template like
//!   `SUMMER-{ALPHA:2}{DIGIT:4}`
//! - **Pluggable generators**: `random` (default) and `sequential`, selected by alias
//! - **Pluggable validators**: chained by alias with per-validator typed options
//! - **Capacity guard**: a batch larger than the code space is refused up front
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           Worker Service                            │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌──────────────────────────────┐  ┌────────────┐  │
//! │  │  API Layer  │  │        Service Layer         │  │   Domain   │  │
//! │  │   (Axum)    │→ │ Manager → Builder/Registries │  │   Models   │  │
//! │  └─────────────┘  └──────────────────────────────┘  └────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;

/// Run the CodeBuilder worker service.
///
/// This function:
/// 1. Initializes logging and metrics
/// 2. Registers the built-in generators and validators
/// 3. Starts the HTTP server
/// 4. Handles graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The metrics recorder cannot be installed
/// - HTTP server fails to bind
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting CodeBuilder Worker"
    );

    let config = Arc::new(config);
    let mut state = AppState::new(Arc::clone(&config));

    if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
        info!("Prometheus metrics recorder installed");
    }

    info!(
        generators = ?state.manager.generators().aliases(),
        validators = ?state.manager.validators().aliases(),
        "Strategies registered"
    );

    let app = create_router(state);

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
