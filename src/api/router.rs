//! Router setup and configuration

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};

use crate::api::handlers;
use crate::api::state::AppState;

/// Path of the SCT feedback endpoint
pub const SCT_FEEDBACK_PATH: &str = "/.well-known/ct/v1/sct-feedback";

/// Path of the STH pollination endpoint
pub const STH_POLLINATION_PATH: &str = "/.well-known/ct/v1/sth-pollination";

/// Create the API router
///
/// Other methods on the gossip paths get 405 with an `Allow: POST` header.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SCT_FEEDBACK_PATH, post(handlers::submit_feedback))
        .route(STH_POLLINATION_PATH, post(handlers::submit_pollination))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
