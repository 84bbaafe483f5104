//! HTTP server exposing the fetch endpoint.
//!
//! Provides one endpoint:
//! - `GET /?url=..&parseRegex=..` - fetch a URL and optionally extract named captures

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;

use crate::app::shutdown_signal;
use crate::error_handling::InitializationError;

pub use handlers::{error_message, fetch_handler, status_for};
pub use types::{AppState, FetchQuery, FetchResponse};

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(fetch_handler))
        .with_state(state)
}

/// Binds `address` and serves the router until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn start_server(address: SocketAddr, state: AppState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|source| InitializationError::ListenerBindError { address, source })?;

    log::info!("Listening on http://{}/", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped");
    Ok(())
}
