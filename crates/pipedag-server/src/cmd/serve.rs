//! Implementation of `pipedag serve`.
//!
//! Binds the configured address and serves the router until Ctrl-C, then
//! drains in-flight requests before returning.
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::router;

/// Runs the HTTP service.
///
/// # Errors
///
/// - [`ServerError::Bind`] if the listener cannot bind.
/// - [`ServerError::Serve`] if the accept loop fails.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;

    let origins: Vec<&str> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.to_str().ok())
        .collect();
    info!(
        addr = %config.addr,
        allowed_origins = ?origins,
        max_body_size = config.max_body_size,
        "listening"
    );

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl-C, shutting down"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
    }
}
