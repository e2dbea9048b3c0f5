//! ct-gossip library exports

pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod traits;
pub mod verifier;

// Re-exports
pub use error::{GossipError, GossipResult, StorageError};
pub use storage::{ChainKey, SamplingStrategy, SqliteConfig, SqliteStore};
pub use traits::{FeedbackEntry, FeedbackVerifier, GossipStorage, PollinationEntry, StorageStats};
pub use verifier::{filter_feedback, EncodingVerifier, PermissiveVerifier};
