// File: src/storage/sqlite/feedback.rs

use super::identity::{CHAINS, SCTS};
use super::store::SqliteStore;
use crate::error::{GossipError, GossipResult};
use crate::storage::chain_key::ChainKey;
use crate::traits::storage::validate_sct;
use crate::traits::FeedbackEntry;
use rusqlite::{params, Connection, Transaction};

impl SqliteStore {
    /// Record a batch of feedback atomically
    pub(crate) fn add_feedback_impl(&self, entries: &[FeedbackEntry]) -> GossipResult<()> {
        // Validate everything before touching the store
        let keyed: Vec<(ChainKey, &FeedbackEntry)> = entries
            .iter()
            .map(|entry| -> GossipResult<(ChainKey, &FeedbackEntry)> {
                entry.validate()?;
                Ok((ChainKey::from_chain(&entry.x509_chain)?, entry))
            })
            .collect::<GossipResult<_>>()?;

        if keyed.is_empty() {
            return Ok(());
        }

        let new_pairs = self.with_tx(|tx| {
            let mut new_pairs = 0;
            for (key, entry) in &keyed {
                new_pairs += add_association(tx, key, &entry.sct_data)?;
            }
            Ok(new_pairs)
        })?;

        tracing::debug!(
            entries = keyed.len(),
            new_pairs = new_pairs,
            "Stored SCT feedback"
        );
        Ok(())
    }

    pub(crate) fn has_feedback_impl(&self, chain: &[String], sct: &str) -> GossipResult<bool> {
        let key = ChainKey::from_chain(chain)?;
        validate_sct(sct)?;

        self.with_conn(|conn| {
            let chain_id = match CHAINS.lookup(conn, key.as_bytes())? {
                Some(id) => id,
                None => return Ok(false),
            };
            let sct_id = match SCTS.lookup(conn, sct.as_bytes())? {
                Some(id) => id,
                None => return Ok(false),
            };
            has_pair(conn, chain_id, sct_id)
        })
    }

    pub(crate) fn chain_id_impl(&self, chain: &[String]) -> GossipResult<i64> {
        let key = ChainKey::from_chain(chain)?;
        self.with_conn(|conn| CHAINS.lookup(conn, key.as_bytes()))?
            .ok_or_else(|| GossipError::NotFound(format!("chain {}", key)))
    }

    pub(crate) fn sct_id_impl(&self, sct: &str) -> GossipResult<i64> {
        validate_sct(sct)?;
        self.with_conn(|conn| SCTS.lookup(conn, sct.as_bytes()))?
            .ok_or_else(|| GossipError::NotFound(format!("sct {}", sct)))
    }

    pub(crate) fn feedback_count_impl(&self) -> GossipResult<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM sct_feedback", [], |r| r.get(0))?;
            Ok(count)
        })
    }
}

/// Resolve the chain and every token, then record each missing pair.
///
/// Returns how many pairs were new.
fn add_association(tx: &Transaction<'_>, key: &ChainKey, scts: &[String]) -> GossipResult<usize> {
    let chain_id = CHAINS.get_or_create(tx, key.as_bytes())?;

    let mut inserted = 0;
    for sct in scts {
        let sct_id = SCTS.get_or_create(tx, sct.as_bytes())?;
        inserted += tx
            .prepare_cached(
                "INSERT INTO sct_feedback (chain_id, sct_id) VALUES (?1, ?2)
                 ON CONFLICT(chain_id, sct_id) DO NOTHING",
            )?
            .execute(params![chain_id, sct_id])?;
    }
    Ok(inserted)
}

fn has_pair(conn: &Connection, chain_id: i64, sct_id: i64) -> GossipResult<bool> {
    let found = conn
        .prepare_cached(
            "SELECT EXISTS(SELECT 1 FROM sct_feedback WHERE chain_id = ?1 AND sct_id = ?2)",
        )?
        .query_row(params![chain_id, sct_id], |row| row.get(0))?;
    Ok(found)
}
