#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use axum::http::{Method, header};
use markaz_server::handler::api_routes;
use markaz_server::service::ServiceState;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Cli, ServerConfig};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "markaz_cli::server::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "markaz_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "markaz_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;

    let applied = markaz_postgres::run_pending_migrations(&state.postgres)
        .await
        .context("failed to apply database migrations")?;

    if !applied.is_empty() {
        tracing::info!(
            target: TRACING_TARGET_STARTUP,
            migrations = ?applied,
            "applied pending database migrations"
        );
    }

    let router = create_router(state, &cli.server);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Tracing spans (outermost)
/// 2. Cross-origin rules
/// 3. Request timeouts
/// 4. Routes (innermost)
fn create_router(state: ServiceState, server_config: &ServerConfig) -> Router {
    api_routes()
        .with_state(state)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer from the configured origins.
fn cors_layer(server_config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(server_config.cors_origins())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
