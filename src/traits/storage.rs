//! Gossip storage trait definition

use serde::{Deserialize, Serialize};

use crate::error::{GossipError, GossipResult};

/// One piece of SCT feedback: a certificate chain and the SCTs observed with it.
///
/// The chain is ordered leaf first. Elements and tokens are opaque strings
/// (base64 on the wire); the store never decodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Leaf certificate followed by intermediates
    pub x509_chain: Vec<String>,

    /// SCT tokens already accepted for storage
    #[serde(default)]
    pub sct_data: Vec<String>,
}

impl FeedbackEntry {
    pub fn new(x509_chain: Vec<String>, sct_data: Vec<String>) -> Self {
        Self {
            x509_chain,
            sct_data,
        }
    }

    /// Reject empty chains, empty chain elements and empty tokens.
    pub fn validate(&self) -> GossipResult<()> {
        validate_chain(&self.x509_chain)?;
        for sct in &self.sct_data {
            validate_sct(sct)?;
        }
        Ok(())
    }
}

/// A Signed Tree Head exchanged through pollination.
///
/// The full tuple is the identity of the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PollinationEntry {
    #[serde(rename = "sth_version")]
    pub version: u32,

    pub tree_size: u64,

    /// Milliseconds since the Unix epoch
    pub timestamp: u64,

    #[serde(rename = "sha256_root_hash")]
    pub root_hash: String,

    #[serde(rename = "tree_head_signature")]
    pub signature: String,

    pub log_id: String,
}

impl PollinationEntry {
    /// Integer fields must fit SQLite's signed 64-bit INTEGER.
    pub fn validate(&self) -> GossipResult<()> {
        if i64::try_from(self.tree_size).is_err() {
            return Err(GossipError::InvalidArgument(format!(
                "tree_size {} out of range",
                self.tree_size
            )));
        }
        if i64::try_from(self.timestamp).is_err() {
            return Err(GossipError::InvalidArgument(format!(
                "timestamp {} out of range",
                self.timestamp
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_chain<S: AsRef<str>>(chain: &[S]) -> GossipResult<()> {
    if chain.is_empty() {
        return Err(GossipError::InvalidArgument("empty certificate chain".into()));
    }
    if let Some(pos) = chain.iter().position(|c| c.as_ref().is_empty()) {
        return Err(GossipError::InvalidArgument(format!(
            "empty certificate at chain position {}",
            pos
        )));
    }
    Ok(())
}

pub(crate) fn validate_sct(sct: &str) -> GossipResult<()> {
    if sct.is_empty() {
        return Err(GossipError::InvalidArgument("empty SCT token".into()));
    }
    Ok(())
}

/// Row counts across all relations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StorageStats {
    pub chain_count: i64,
    pub sct_count: i64,
    pub feedback_count: i64,
    pub pollination_count: i64,
}

/// Storage backend for gossip feedback and pollination.
///
/// Every mutating call runs in exactly one transaction: either all of its
/// entries are durably recorded or none are. Reads never open a transaction.
pub trait GossipStorage: Send + Sync {
    // ========== Feedback ==========

    /// Record every (chain, sct) pair of every entry. Idempotent.
    fn add_feedback(&self, entries: &[FeedbackEntry]) -> GossipResult<()>;

    /// Whether the (chain, sct) pair has been recorded
    fn has_feedback(&self, chain: &[String], sct: &str) -> GossipResult<bool>;

    /// Identity of a known chain (`NotFound` otherwise)
    fn chain_id(&self, chain: &[String]) -> GossipResult<i64>;

    /// Identity of a known SCT token (`NotFound` otherwise)
    fn sct_id(&self, sct: &str) -> GossipResult<i64>;

    fn chain_count(&self) -> GossipResult<i64>;
    fn sct_count(&self) -> GossipResult<i64>;
    fn feedback_count(&self) -> GossipResult<i64>;

    // ========== Pollination ==========

    /// Store STHs, silently ignoring tuples already present
    fn add_pollination(&self, entries: &[PollinationEntry]) -> GossipResult<()>;

    /// Exact tuple match
    fn has_pollination(&self, entry: &PollinationEntry) -> GossipResult<bool>;

    fn pollination_count(&self) -> GossipResult<i64>;

    /// Up to `limit` STHs no older than the freshness window, chosen
    /// uniformly at random without replacement.
    fn sample_fresh_pollination(&self, limit: usize) -> GossipResult<Vec<PollinationEntry>>;

    // ========== Diagnostics ==========

    fn stats(&self) -> GossipResult<StorageStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_validate_rejects_empty_chain() {
        let entry = FeedbackEntry::new(vec![], vec!["SCT".into()]);
        assert!(matches!(
            entry.validate(),
            Err(GossipError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_feedback_validate_rejects_empty_element_and_token() {
        let entry = FeedbackEntry::new(vec!["LEAF".into(), "".into()], vec![]);
        assert!(entry.validate().is_err());

        let entry = FeedbackEntry::new(vec!["LEAF".into()], vec!["".into()]);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_feedback_without_scts_is_valid() {
        let entry = FeedbackEntry::new(vec!["LEAF".into()], vec![]);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_pollination_validate_range() {
        let mut entry = PollinationEntry {
            version: 0,
            tree_size: 100,
            timestamp: 1_438_254_824_000,
            root_hash: "HASH".into(),
            signature: "SIG".into(),
            log_id: "LOG".into(),
        };
        assert!(entry.validate().is_ok());

        entry.timestamp = u64::MAX;
        assert!(entry.validate().is_err());

        entry.timestamp = 0;
        entry.tree_size = i64::MAX as u64 + 1;
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_pollination_wire_names() {
        let json = serde_json::json!({
            "sth_version": 0,
            "tree_size": 100,
            "timestamp": 1438254824,
            "sha256_root_hash": "HASH0",
            "tree_head_signature": "SIG0",
            "log_id": "LOG0"
        });
        let entry: PollinationEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.root_hash, "HASH0");
        assert_eq!(entry.signature, "SIG0");

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["sha256_root_hash"], "HASH0");
        assert_eq!(back["sth_version"], 0);
    }

    #[test]
    fn test_feedback_sct_data_defaults_to_empty() {
        let entry: FeedbackEntry =
            serde_json::from_str(r#"{"x509_chain": ["CHAIN00"]}"#).unwrap();
        assert!(entry.sct_data.is_empty());
    }
}
