//! Response DTOs

use serde::{Deserialize, Serialize};

use crate::traits::{PollinationEntry, StorageStats};

/// Fresh STHs handed back to a pollinating client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SthPollinationResponse {
    pub sths: Vec<PollinationEntry>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,

    /// Row counts (present when the store answered)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StorageStats>,

    /// Error message (when unhealthy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
