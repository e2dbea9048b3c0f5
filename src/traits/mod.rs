//! Trait definitions for storage and verification

pub mod storage;
pub mod verifier;

pub use storage::{FeedbackEntry, GossipStorage, PollinationEntry, StorageStats};
pub use verifier::{AcceptedChain, ChainVerdict, FeedbackVerifier, SctVerdict};
