//! HTTP server startup with lifecycle management.

mod error;
mod http_server;
mod shutdown;

use axum::Router;
pub use error::{Result, ServerError};
use http_server::serve_http;
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Starts the HTTP server with the given router and configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The address/port cannot be bound
/// - The server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}
