//! dirops server
//!
//! Serves the bulk directory operations API, the audit record endpoints
//! and the helpdesk ticketing API over one listener.

mod config;
mod health;
mod logging;
mod openapi;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use dirops_api::{ops_router, OpsState};
use dirops_audit::AuditStore;
use dirops_core::load_profiles;
use dirops_gateway::{GatewayConfig, PsGateway};
use dirops_tickets::{tickets_router, TicketService};

use config::Config;
use health::health_handler;
use openapi::swagger_routes;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting dirops server"
    );

    let audit = match AuditStore::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open audit database: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = audit.migrate().await {
        eprintln!("Audit database migration failed: {e}");
        std::process::exit(1);
    }

    let tickets = match TicketService::connect(&config.tickets_database_url).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Failed to open tickets database: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = tickets.migrate().await {
        eprintln!("Tickets database migration failed: {e}");
        std::process::exit(1);
    }

    // Profiles are optional: without a configured file the credentials
    // endpoint simply returns an empty list.
    let profiles = match &config.credentials_file {
        Some(path) => match load_profiles(path) {
            Ok(profiles) => {
                info!(count = profiles.len(), "Loaded connection profiles");
                profiles
            }
            Err(e) => {
                eprintln!("Failed to load connection profiles: {e}");
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    let mut gateway_config = GatewayConfig {
        action_timeout: config.action_timeout,
        bulk_timeout: config.bulk_timeout,
        ..GatewayConfig::default()
    };
    if let Some(shell) = &config.shell {
        gateway_config.shell = shell.clone();
    }
    let gateway = Arc::new(PsGateway::new(gateway_config));

    let state = OpsState::new(gateway, audit.clone(), profiles);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(ops_router(state))
        .merge(tickets_router(tickets))
        .merge(swagger_routes())
        .route("/api/health", get(health_handler).with_state(audit))
        .layer(cors);

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid listen address: {e}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
