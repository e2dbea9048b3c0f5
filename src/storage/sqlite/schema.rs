// File: src/storage/sqlite/schema.rs

use crate::error::{GossipResult, StorageError};
use rusqlite::{params, Connection, OptionalExtension};

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Create all tables (idempotent) and record the schema version
pub fn create_tables(conn: &Connection) -> GossipResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    migrate(conn)
}

/// Check the stored version and bring it up to date
pub fn migrate(conn: &Connection) -> GossipResult<()> {
    let current = schema_version(conn)?;

    if let Some(v) = current {
        if v > SCHEMA_VERSION {
            return Err(StorageError::MigrationFailed(format!(
                "database schema v{} is newer than supported v{}",
                v, SCHEMA_VERSION
            ))
            .into());
        }
    }

    let now = chrono::Utc::now().timestamp_millis();
    conn.execute(
        "INSERT OR REPLACE INTO gossip_config (key, value, updated_at) VALUES ('schema_version', ?1, ?2)",
        params![SCHEMA_VERSION.to_string(), now],
    )?;

    Ok(())
}

/// Stored schema version, `None` on a fresh database
pub fn schema_version(conn: &Connection) -> GossipResult<Option<u32>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM gossip_config WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    value
        .map(|v| {
            v.parse().map_err(|_| {
                StorageError::Corruption(format!("invalid schema_version: {}", v)).into()
            })
        })
        .transpose()
}

const SCHEMA_SQL: &str = r#"
-- Core configuration
CREATE TABLE IF NOT EXISTS gossip_config (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL             -- Unix milliseconds
);

-- Chain identities
CREATE TABLE IF NOT EXISTS chains (
    chain_id INTEGER PRIMARY KEY AUTOINCREMENT,
    chain_key BLOB NOT NULL UNIQUE          -- 32 bytes, length-prefixed SHA-256
);

-- SCT identities
CREATE TABLE IF NOT EXISTS scts (
    sct_id INTEGER PRIMARY KEY AUTOINCREMENT,
    sct BLOB NOT NULL UNIQUE                -- Opaque token bytes
);

-- Feedback: which SCTs were observed with which chain
CREATE TABLE IF NOT EXISTS sct_feedback (
    chain_id INTEGER NOT NULL REFERENCES chains(chain_id),
    sct_id INTEGER NOT NULL REFERENCES scts(sct_id),
    PRIMARY KEY (chain_id, sct_id)
) WITHOUT ROWID;

-- Pollination: full tuple is the key
CREATE TABLE IF NOT EXISTS sths (
    version INTEGER NOT NULL,
    tree_size INTEGER NOT NULL,
    timestamp INTEGER NOT NULL,             -- Unix milliseconds
    root_hash TEXT NOT NULL,
    signature TEXT NOT NULL,
    log_id TEXT NOT NULL,
    UNIQUE (version, tree_size, timestamp, root_hash, signature, log_id)
);

CREATE INDEX IF NOT EXISTS idx_sths_timestamp ON sths(timestamp);
"#;
