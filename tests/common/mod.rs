//! Common test utilities and fixtures
//!
//! - Test app setup with in-memory or on-disk storage
//! - Builders for feedback and STH test data

#![allow(dead_code)]

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::*;

// Re-export frequently used external types for convenience
pub use axum::body::Body;
pub use axum::http::{Request, StatusCode};
pub use std::sync::Arc;
pub use tower::ServiceExt;
