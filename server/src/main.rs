//! TicketsMaster Server - Main entry point.
//!
//! This binary starts the ticketing REST API with:
//! - Structured JSON logging for production
//! - Startup seeding (sample events, default admin)
//! - Graceful shutdown handling (SIGTERM/SIGINT)
//!
//! # Configuration
//!
//! See [`ticketsmaster_server::config`] for environment variable
//! configuration. Every variable has a development fallback, so a bare
//! `cargo run --bin ticketsmaster-server` works against a local MongoDB.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use ticketsmaster_server::config::Config;
use ticketsmaster_server::routes::{create_router, AppState};
use ticketsmaster_server::seed::{ensure_default_admin, seed_events_if_empty};
use ticketsmaster_server::store::MongoStore;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            eprintln!("Error: {err}");
            eprintln!();
            eprintln!("Environment variables (all optional):");
            eprintln!("  PORT                        - HTTP server port (default: 3000)");
            eprintln!("  TICKETSMASTER_JWT_SECRET    - Token signing secret");
            eprintln!("  TICKETSMASTER_MONGODB_URI   - Document store connection string");
            eprintln!("  RUST_LOG                    - Log level filter (default: info)");
            return ExitCode::from(1);
        }
    };

    info!(port = config.port, "TicketsMaster server starting");

    let store = match MongoStore::connect(&config.mongodb_uri).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(error = %err, "Failed to connect to document store");
            return ExitCode::from(1);
        }
    };

    // Seed default data. The driver connects lazily, so an unreachable
    // deployment surfaces here rather than at connect time.
    if let Err(err) = seed_events_if_empty(store.as_ref()).await {
        error!(error = %err, "Failed to seed events");
        return ExitCode::from(1);
    }
    if let Err(err) = ensure_default_admin(store.as_ref()).await {
        error!(error = %err, "Failed to create default admin");
        return ExitCode::from(1);
    }

    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => {
            info!(address = %bind_addr, "Server listening");
            listener
        }
        Err(err) => {
            error!(error = %err, address = %bind_addr, "Failed to bind to address");
            return ExitCode::from(1);
        }
    };

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    info!("Server ready to accept connections");

    if let Err(err) = server.await {
        error!(error = %err, "Server error");
        return ExitCode::from(1);
    }

    info!("Server shutdown complete");
    ExitCode::SUCCESS
}

/// Initialize structured logging with tracing.
///
/// JSON-formatted output with environment-based level filtering via
/// `RUST_LOG`, defaulting to `info`.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,axum::rejection=trace"));

    let json_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .init();
}

/// Creates a future that resolves when a shutdown signal is received.
///
/// Listens for SIGTERM (container orchestrator shutdown) and SIGINT
/// (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
