// File: src/storage/sqlite/convert.rs

use crate::traits::PollinationEntry;
use rusqlite::Row;

/// Columns expected by `row_to_pollination`, in order
pub const POLLINATION_COLUMNS: &str = "version, tree_size, timestamp, root_hash, signature, log_id";

/// Convert a database row to PollinationEntry
pub fn row_to_pollination(row: &Row) -> rusqlite::Result<PollinationEntry> {
    let version: i64 = row.get(0)?;
    let tree_size: i64 = row.get(1)?;
    let timestamp: i64 = row.get(2)?;

    Ok(PollinationEntry {
        version: u32::try_from(version)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, version))?,
        tree_size: u64::try_from(tree_size)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, tree_size))?,
        timestamp: u64::try_from(timestamp)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(2, timestamp))?,
        root_hash: row.get(3)?,
        signature: row.get(4)?,
        log_id: row.get(5)?,
    })
}
