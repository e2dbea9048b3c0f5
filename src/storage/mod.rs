//! Storage module
//!
//! SQLite-backed persistence for chains, SCTs, their feedback pairs and
//! pollinated STHs.

pub mod chain_key;
pub mod sampling;
pub mod sqlite;

pub use crate::traits::GossipStorage;

pub use chain_key::ChainKey;
pub use sampling::SamplingStrategy;
pub use sqlite::{SqliteConfig, SqliteStore, FRESHNESS_WINDOW_DAYS};
