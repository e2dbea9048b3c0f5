// File: src/storage/sqlite/identity.rs

//! Get-or-create mapping from an opaque key to a stable integer identity
//!
//! Identities come from `INTEGER PRIMARY KEY AUTOINCREMENT`, so an id is
//! never handed out twice even if rows were ever removed.

use crate::error::{is_constraint_conflict, GossipResult, StorageError};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

/// One identity relation: `(id INTEGER PRIMARY KEY, key BLOB UNIQUE)`
#[derive(Debug, Clone, Copy)]
pub(crate) struct IdentityTable {
    table: &'static str,
    id_column: &'static str,
    key_column: &'static str,
}

pub(crate) const CHAINS: IdentityTable = IdentityTable {
    table: "chains",
    id_column: "chain_id",
    key_column: "chain_key",
};

pub(crate) const SCTS: IdentityTable = IdentityTable {
    table: "scts",
    id_column: "sct_id",
    key_column: "sct",
};

impl IdentityTable {
    /// Return the identity of `key`, allocating one if it is new.
    ///
    /// Must run inside the caller's transaction. The insert is a no-op when
    /// the key exists; the id is then read back within the same transaction.
    /// A uniqueness failure from the insert takes the same path.
    pub(crate) fn get_or_create(&self, tx: &Transaction<'_>, key: &[u8]) -> GossipResult<i64> {
        let insert = format!(
            "INSERT INTO {} ({}) VALUES (?1) ON CONFLICT({}) DO NOTHING",
            self.table, self.key_column, self.key_column
        );

        match tx.prepare_cached(&insert)?.execute(params![key]) {
            Ok(1) => return Ok(tx.last_insert_rowid()),
            Ok(_) => {}
            Err(e) if is_constraint_conflict(&e) => {
                tracing::debug!(table = self.table, "identity insert conflicted, reading back");
            }
            Err(e) => return Err(e.into()),
        }

        self.lookup(tx, key)?.ok_or_else(|| {
            StorageError::Corruption(format!(
                "{} key present on conflict but not readable",
                self.table
            ))
            .into()
        })
    }

    /// Pure read; never creates
    pub(crate) fn lookup(&self, conn: &Connection, key: &[u8]) -> GossipResult<Option<i64>> {
        let select = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.id_column, self.table, self.key_column
        );
        let id = conn
            .prepare_cached(&select)?
            .query_row(params![key], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    pub(crate) fn count(&self, conn: &Connection) -> GossipResult<i64> {
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}
