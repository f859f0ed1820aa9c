//! Listener setup

use crate::error::{Error, Result};
use tokio::net::TcpListener;
use tracing::info;

/// Bind the HTTP listener on `addr` (`host:port`)
pub async fn bind_listener(addr: &str) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;

    let local = listener
        .local_addr()
        .map_err(|e| Error::Http(format!("Failed to read local address: {}", e)))?;
    info!("Listening on http://{}", local);

    Ok(listener)
}
