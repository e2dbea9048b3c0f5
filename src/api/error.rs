//! API error response types

use crate::error::GossipError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};

/// API error response body
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Machine-readable error code
    pub code: String,

    /// Whether the client may retry
    pub recoverable: bool,
}

impl IntoResponse for GossipError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            recoverable: self.is_recoverable(),
        };

        (status, Json(body)).into_response()
    }
}
