// File: src/storage/sqlite/config.rs

use crate::storage::sampling::SamplingStrategy;

/// SQLite storage backend configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to database file (or ":memory:" for in-memory)
    pub path: String,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,

    /// Busy timeout in milliseconds
    pub busy_timeout_ms: u32,

    /// Enable foreign key enforcement
    pub foreign_keys: bool,

    /// How fresh pollination is sampled
    pub sampling: SamplingStrategy,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "gossip.db".to_string(),
            wal_mode: true, // Enable WAL for concurrent reads
            busy_timeout_ms: 5000,
            foreign_keys: true,
            sampling: SamplingStrategy::Native,
        }
    }
}
