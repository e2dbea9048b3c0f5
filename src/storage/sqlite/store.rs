// File: src/storage/sqlite/store.rs

use super::config::SqliteConfig;
use super::schema;
use crate::error::{GossipError, GossipResult};
use crate::traits::{FeedbackEntry, GossipStorage, PollinationEntry, StorageStats};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Mutex;

/// SQLite implementation of the GossipStorage trait
///
/// The handle owns the only connection. `close()` releases it; every call
/// after that fails with `StorageUnavailable`.
pub struct SqliteStore {
    /// Database connection (None once closed)
    conn: Mutex<Option<Connection>>,

    config: SqliteConfig,
}

impl SqliteStore {
    /// Create a new SqliteStore with default configuration
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn new<P: AsRef<Path>>(path: P) -> GossipResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: SqliteConfig) -> GossipResult<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            GossipError::StorageUnavailable(format!("failed to open {}: {}", config.path, e))
        })?;

        Self::configure_connection(&conn, &config)?;
        schema::create_tables(&conn)?;

        tracing::info!(
            path = %config.path,
            sampling = config.sampling.as_str(),
            "Opened gossip store"
        );

        Ok(Self {
            conn: Mutex::new(Some(conn)),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> GossipResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Open an existing database (fails if doesn't exist)
    pub fn open<P: AsRef<Path>>(path: P) -> GossipResult<Self> {
        if !path.as_ref().exists() {
            return Err(GossipError::StorageUnavailable(format!(
                "database does not exist: {}",
                path.as_ref().display()
            )));
        }
        Self::new(path)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> GossipResult<()> {
        if config.wal_mode && config.path != ":memory:" {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)?;
        if config.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }

    /// Release the connection. Closing twice is a no-op.
    pub fn close(&self) -> GossipResult<()> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| GossipError::StorageUnavailable("lock poisoned".into()))?;

        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| GossipError::from(e))?;
            tracing::info!(path = %self.config.path, "Closed gossip store");
        }
        Ok(())
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Run `f` against the open connection without a transaction
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> GossipResult<T>,
    ) -> GossipResult<T> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| GossipError::StorageUnavailable("lock poisoned".into()))?;
        let conn = guard
            .as_mut()
            .ok_or_else(|| GossipError::StorageUnavailable("store is closed".into()))?;
        f(conn)
    }

    /// Run `f` inside one write transaction.
    ///
    /// Commits only if `f` succeeds; any error drops the transaction, which
    /// rolls back everything `f` did.
    pub(crate) fn with_tx<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> GossipResult<T>,
    ) -> GossipResult<T> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let out = f(&tx)?;
            tx.commit()?;
            Ok(out)
        })
    }
}

impl GossipStorage for SqliteStore {
    fn add_feedback(&self, entries: &[FeedbackEntry]) -> GossipResult<()> {
        self.add_feedback_impl(entries)
    }

    fn has_feedback(&self, chain: &[String], sct: &str) -> GossipResult<bool> {
        self.has_feedback_impl(chain, sct)
    }

    fn chain_id(&self, chain: &[String]) -> GossipResult<i64> {
        self.chain_id_impl(chain)
    }

    fn sct_id(&self, sct: &str) -> GossipResult<i64> {
        self.sct_id_impl(sct)
    }

    fn chain_count(&self) -> GossipResult<i64> {
        self.with_conn(|conn| super::identity::CHAINS.count(conn))
    }

    fn sct_count(&self) -> GossipResult<i64> {
        self.with_conn(|conn| super::identity::SCTS.count(conn))
    }

    fn feedback_count(&self) -> GossipResult<i64> {
        self.feedback_count_impl()
    }

    fn add_pollination(&self, entries: &[PollinationEntry]) -> GossipResult<()> {
        self.add_pollination_impl(entries)
    }

    fn has_pollination(&self, entry: &PollinationEntry) -> GossipResult<bool> {
        self.has_pollination_impl(entry)
    }

    fn pollination_count(&self) -> GossipResult<i64> {
        self.pollination_count_impl()
    }

    fn sample_fresh_pollination(&self, limit: usize) -> GossipResult<Vec<PollinationEntry>> {
        self.sample_fresh_at(chrono::Utc::now(), limit)
    }

    fn stats(&self) -> GossipResult<StorageStats> {
        Ok(StorageStats {
            chain_count: self.chain_count()?,
            sct_count: self.sct_count()?,
            feedback_count: self.feedback_count()?,
            pollination_count: self.pollination_count()?,
        })
    }
}
