//! Graceful shutdown signal handling.

use std::time::Duration;

use crate::TRACING_TARGET_SHUTDOWN;

/// Resolves once SIGINT (Ctrl+C) or SIGTERM is received.
///
/// Passed to axum's graceful-shutdown hook; once it resolves the server
/// stops accepting connections and drains in-flight requests for up to
/// `shutdown_timeout`.
pub async fn shutdown_signal(shutdown_timeout: Duration) {
    let signal_name = tokio::select! {
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        signal = signal_name,
        timeout_secs = shutdown_timeout.as_secs(),
        "shutdown signal received, draining in-flight requests"
    );
}

/// Waits for Ctrl+C. If the handler cannot be installed, parks forever so
/// the other signal branch still works.
async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "failed to install the Ctrl+C handler"
        );
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "failed to install the SIGTERM handler"
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
