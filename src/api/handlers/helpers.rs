//! Shared handler helpers

use axum::body::{to_bytes, Body};
use serde::de::DeserializeOwned;

use crate::error::{GossipError, GossipResult};

/// Largest request body accepted (1MB)
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Read the whole body and parse it as JSON
pub(super) async fn read_json<T: DeserializeOwned>(body: Body) -> GossipResult<T> {
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| GossipError::InvalidArgument(format!("Failed to read body: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| GossipError::InvalidArgument(format!("Invalid JSON: {}", e)))
}

/// Run a store call off the async runtime
pub(super) async fn blocking<T, F>(f: F) -> GossipResult<T>
where
    F: FnOnce() -> GossipResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
