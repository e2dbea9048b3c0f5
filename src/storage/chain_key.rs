// File: src/storage/chain_key.rs

//! Unambiguous identity key for an ordered certificate chain
//!
//! The key is `SHA-256(count || len(e0) || e0 || len(e1) || e1 || ...)` with
//! every length and the count as big-endian `u64`. Length prefixes keep
//! `["AB", "C"]` and `["A", "BC"]` apart; the digest keeps keys at 32 bytes
//! however long the chain is.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::GossipResult;
use crate::traits::storage::validate_chain;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainKey([u8; 32]);

impl ChainKey {
    /// Compute the key of a leaf-first chain.
    ///
    /// Fails with `InvalidArgument` on an empty chain or an empty element.
    pub fn from_chain<S: AsRef<str>>(chain: &[S]) -> GossipResult<Self> {
        validate_chain(chain)?;

        let mut hasher = Sha256::new();
        hasher.update((chain.len() as u64).to_be_bytes());
        for element in chain {
            let bytes = element.as_ref().as_bytes();
            hasher.update((bytes.len() as u64).to_be_bytes());
            hasher.update(bytes);
        }
        Ok(Self(hasher.finalize().into()))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainKey({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GossipError;

    #[test]
    fn test_same_chain_same_key() {
        let a = ChainKey::from_chain(&["LEAF", "INTER"]).unwrap();
        let b = ChainKey::from_chain(&["LEAF".to_string(), "INTER".to_string()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_point_changes_key() {
        let ab_c = ChainKey::from_chain(&["AB", "C"]).unwrap();
        let a_bc = ChainKey::from_chain(&["A", "BC"]).unwrap();
        let abc = ChainKey::from_chain(&["ABC"]).unwrap();
        assert_ne!(ab_c, a_bc);
        assert_ne!(ab_c, abc);
        assert_ne!(a_bc, abc);
    }

    #[test]
    fn test_order_changes_key() {
        let fwd = ChainKey::from_chain(&["LEAF", "INTER"]).unwrap();
        let rev = ChainKey::from_chain(&["INTER", "LEAF"]).unwrap();
        assert_ne!(fwd, rev);
    }

    #[test]
    fn test_empty_chain_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            ChainKey::from_chain(&empty),
            Err(GossipError::InvalidArgument(_))
        ));
        assert!(ChainKey::from_chain(&["LEAF", ""]).is_err());
    }

    #[test]
    fn test_display_is_hex() {
        let key = ChainKey::from_chain(&["LEAF"]).unwrap();
        let shown = key.to_string();
        assert_eq!(shown.len(), 64);
        assert!(shown.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(format!("{:?}", key).starts_with("ChainKey("));
    }
}
