//! Gossip store error types

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum GossipError {
    // ========== Lookup Errors ==========
    /// Pure lookup found nothing (never produced by get-or-create paths)
    #[error("not found: {0}")]
    NotFound(String),

    // ========== Validation Errors ==========
    /// Rejected before any store interaction
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Storage Errors ==========
    /// Store cannot be reached (closed handle, failed open, poisoned lock)
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(StorageError),

    // ========== Server Errors ==========
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Schema migration failed
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Data corruption detected
    #[error("data corruption: {0}")]
    Corruption(String),

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type alias
pub type GossipResult<T> = Result<T, GossipError>;

impl GossipError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GossipError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            GossipError::NotFound(_) => StatusCode::NOT_FOUND,
            GossipError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GossipError::Storage(_) | GossipError::Internal(_) | GossipError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            GossipError::NotFound(_) => "NOT_FOUND",
            GossipError::InvalidArgument(_) => "INVALID_ARGUMENT",
            GossipError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            GossipError::Storage(_) => "STORAGE_ERROR",
            GossipError::Internal(_) => "INTERNAL_ERROR",
            GossipError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if error is recoverable (client can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GossipError::StorageUnavailable(_))
    }
}

/// Returns true for SQLite uniqueness / primary key violations.
///
/// These are recovered locally by the idempotent insert paths and never
/// surfaced to callers. Other constraint failures (CHECK, NOT NULL, trigger
/// aborts) are real errors.
pub(crate) fn is_constraint_conflict(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

// Conversions from external errors

impl From<serde_json::Error> for GossipError {
    fn from(e: serde_json::Error) -> Self {
        GossipError::InvalidArgument(e.to_string())
    }
}

impl From<rusqlite::Error> for GossipError {
    fn from(e: rusqlite::Error) -> Self {
        let unavailable = matches!(
            &e,
            rusqlite::Error::SqliteFailure(err, _)
                if matches!(
                    err.code,
                    rusqlite::ErrorCode::CannotOpen
                        | rusqlite::ErrorCode::DatabaseBusy
                        | rusqlite::ErrorCode::DatabaseLocked
                        | rusqlite::ErrorCode::NotADatabase
                )
        );

        if unavailable {
            GossipError::StorageUnavailable(e.to_string())
        } else {
            GossipError::Storage(StorageError::Sqlite(e))
        }
    }
}

impl From<StorageError> for GossipError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Sqlite(inner) => inner.into(),
            other => GossipError::Storage(other),
        }
    }
}

impl From<tokio::task::JoinError> for GossipError {
    fn from(e: tokio::task::JoinError) -> Self {
        GossipError::Internal(format!("blocking task failed: {}", e))
    }
}
