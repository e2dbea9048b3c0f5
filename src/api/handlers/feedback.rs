//! SCT feedback handler

use std::sync::Arc;

use axum::{body::Body, extract::State, http::StatusCode};

use super::helpers::{blocking, read_json};
use crate::api::dto::SctFeedbackRequest;
use crate::api::state::AppState;
use crate::error::GossipError;
use crate::verifier::filter_feedback;

/// POST /.well-known/ct/v1/sct-feedback
///
/// Verified feedback is stored in one transaction. Responds 200 with an
/// empty body.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<StatusCode, GossipError> {
    let req: SctFeedbackRequest = read_json(body).await?;
    let submitted = req.sct_feedback.len();

    let accepted = filter_feedback(state.verifier.as_ref(), req.sct_feedback);
    let kept = accepted.len();

    let storage = state.storage.clone();
    blocking(move || storage.add_feedback(&accepted)).await?;

    tracing::debug!(submitted, kept, "Accepted SCT feedback");
    Ok(StatusCode::OK)
}
