//! STH pollination handler

use std::sync::Arc;

use axum::{body::Body, extract::State, Json};

use super::helpers::{blocking, read_json};
use crate::api::dto::{SthPollinationRequest, SthPollinationResponse};
use crate::api::state::AppState;
use crate::error::GossipError;

/// POST /.well-known/ct/v1/sth-pollination
///
/// Stores the submitted STHs, then answers with a random sample of fresh
/// ones the server knows about.
pub async fn submit_pollination(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<SthPollinationResponse>, GossipError> {
    let req: SthPollinationRequest = read_json(body).await?;

    let storage = state.storage.clone();
    let limit = state.sample_limit;
    let sths = blocking(move || {
        storage.add_pollination(&req.sths)?;
        storage.sample_fresh_pollination(limit)
    })
    .await?;

    Ok(Json(SthPollinationResponse { sths }))
}
