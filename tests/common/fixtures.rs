//! Test fixtures and app setup utilities

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use ct_gossip::api::{create_router, AppState};
use ct_gossip::traits::FeedbackVerifier;
use ct_gossip::{FeedbackEntry, PermissiveVerifier, PollinationEntry, SqliteStore};
use std::sync::Arc;

/// Create a test app around the given store
pub fn test_app_with(
    store: Arc<SqliteStore>,
    verifier: Arc<dyn FeedbackVerifier>,
    sample_limit: usize,
) -> Router {
    create_router(Arc::new(AppState {
        storage: store,
        verifier,
        sample_limit,
    }))
}

/// Create a test app with in-memory storage and a permissive verifier
pub fn test_app() -> (Router, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::in_memory().expect("Failed to create in-memory storage"));
    let app = test_app_with(store.clone(), Arc::new(PermissiveVerifier), 10);
    (app, store)
}

/// POST a JSON body
pub fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn feedback(chain: &[&str], scts: &[&str]) -> FeedbackEntry {
    FeedbackEntry::new(strings(chain), strings(scts))
}

/// STH with the given timestamp (Unix ms)
pub fn sth_at(n: u64, timestamp: u64) -> PollinationEntry {
    PollinationEntry {
        version: 0,
        tree_size: 100 + n,
        timestamp,
        root_hash: format!("HASH{}", n),
        signature: format!("SIG{}", n),
        log_id: format!("LOG{}", n % 3),
    }
}

/// STH stamped `age_days` before now
pub fn sth_aged(n: u64, age_days: i64) -> PollinationEntry {
    let ts = (Utc::now() - Duration::days(age_days)).timestamp_millis();
    sth_at(n, ts as u64)
}

/// STH stamped now
pub fn fresh_sth(n: u64) -> PollinationEntry {
    sth_aged(n, 0)
}
