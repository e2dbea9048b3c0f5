//! Request DTOs

use serde::{Deserialize, Serialize};

use crate::traits::{FeedbackEntry, PollinationEntry};

/// Request body for POST /.well-known/ct/v1/sct-feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SctFeedbackRequest {
    pub sct_feedback: Vec<FeedbackEntry>,
}

/// Request body for POST /.well-known/ct/v1/sth-pollination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SthPollinationRequest {
    #[serde(default)]
    pub sths: Vec<PollinationEntry>,
}
