// File: src/storage/sqlite/pollination.rs

use super::convert::{row_to_pollination, POLLINATION_COLUMNS};
use super::store::SqliteStore;
use crate::error::GossipResult;
use crate::storage::sampling::{try_reservoir_sample, SamplingStrategy};
use crate::traits::PollinationEntry;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};

/// STHs older than this are not handed out
pub const FRESHNESS_WINDOW_DAYS: i64 = 14;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Oldest timestamp (Unix ms) still considered fresh at `now`
pub fn freshness_cutoff(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis() - FRESHNESS_WINDOW_DAYS * MILLIS_PER_DAY
}

impl SqliteStore {
    /// Store a batch of STHs atomically, skipping known tuples
    pub(crate) fn add_pollination_impl(&self, entries: &[PollinationEntry]) -> GossipResult<()> {
        for entry in entries {
            entry.validate()?;
        }
        if entries.is_empty() {
            return Ok(());
        }

        let inserted = self.with_tx(|tx| {
            let mut inserted = 0;
            for entry in entries {
                inserted += insert_if_absent(tx, entry)?;
            }
            Ok(inserted)
        })?;

        tracing::debug!(
            entries = entries.len(),
            inserted = inserted,
            "Stored STH pollination"
        );
        Ok(())
    }

    pub(crate) fn has_pollination_impl(&self, entry: &PollinationEntry) -> GossipResult<bool> {
        entry.validate()?;
        self.with_conn(|conn| {
            let found = conn
                .prepare_cached(
                    "SELECT EXISTS(SELECT 1 FROM sths
                     WHERE version = ?1 AND tree_size = ?2 AND timestamp = ?3
                       AND root_hash = ?4 AND signature = ?5 AND log_id = ?6)",
                )?
                .query_row(
                    params![
                        entry.version,
                        entry.tree_size as i64,
                        entry.timestamp as i64,
                        entry.root_hash,
                        entry.signature,
                        entry.log_id,
                    ],
                    |row| row.get(0),
                )?;
            Ok(found)
        })
    }

    pub(crate) fn pollination_count_impl(&self) -> GossipResult<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM sths", [], |r| r.get(0))?;
            Ok(count)
        })
    }

    /// Number of STHs fresh at `now`
    pub fn fresh_pollination_count_at(&self, now: DateTime<Utc>) -> GossipResult<i64> {
        let cutoff = freshness_cutoff(now);
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM sths WHERE timestamp >= ?1",
                params![cutoff],
                |r| r.get(0),
            )?;
            Ok(count)
        })
    }

    /// Sample up to `limit` STHs that are fresh relative to `now`.
    ///
    /// An empty pool yields an empty vector.
    pub fn sample_fresh_at(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> GossipResult<Vec<PollinationEntry>> {
        let cutoff = freshness_cutoff(now);
        let strategy = self.config().sampling;

        self.with_conn(|conn| {
            if limit == 0 {
                return Ok(Vec::new());
            }
            match strategy {
                SamplingStrategy::Native => sample_native(conn, cutoff, limit),
                SamplingStrategy::Reservoir => sample_reservoir(conn, cutoff, limit),
            }
        })
    }
}

fn insert_if_absent(tx: &Transaction<'_>, entry: &PollinationEntry) -> GossipResult<usize> {
    let changed = tx
        .prepare_cached(
            "INSERT OR IGNORE INTO sths (version, tree_size, timestamp, root_hash, signature, log_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?
        .execute(params![
            entry.version,
            entry.tree_size as i64,
            entry.timestamp as i64,
            entry.root_hash,
            entry.signature,
            entry.log_id,
        ])?;
    Ok(changed)
}

/// SQLite ranks every qualifying row with `random()` and keeps the lowest
/// `limit` using a bounded sorter.
fn sample_native(conn: &Connection, cutoff: i64, limit: usize) -> GossipResult<Vec<PollinationEntry>> {
    let sql = format!(
        "SELECT {} FROM sths WHERE timestamp >= ?1 ORDER BY random() LIMIT ?2",
        POLLINATION_COLUMNS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(
        params![cutoff, i64::try_from(limit).unwrap_or(i64::MAX)],
        row_to_pollination,
    )?;
    let entries = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// Streams the qualifying rows once, holding at most `limit` of them.
fn sample_reservoir(
    conn: &Connection,
    cutoff: i64,
    limit: usize,
) -> GossipResult<Vec<PollinationEntry>> {
    let sql = format!("SELECT {} FROM sths WHERE timestamp >= ?1", POLLINATION_COLUMNS);
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![cutoff], row_to_pollination)?;
    let entries = try_reservoir_sample(rows, limit, &mut rand::thread_rng())?;
    Ok(entries)
}
