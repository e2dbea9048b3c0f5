//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::traits::{FeedbackVerifier, GossipStorage};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gossip store (blocking; called via spawn_blocking)
    pub storage: Arc<dyn GossipStorage>,

    /// Filters submitted feedback before it is stored
    pub verifier: Arc<dyn FeedbackVerifier>,

    /// STHs returned per pollination response
    /// Source: CT_GOSSIP_SAMPLE_LIMIT env var
    pub sample_limit: usize,
}
