//! Feedback verification seam
//!
//! Chain and SCT validation happens outside the store. The store only ever
//! persists material a verifier has accepted.

/// A chain that passed verification.
///
/// Handed to `verify_sct` for every token submitted with the chain, so an
/// SCT check can bind the token to the leaf it claims to cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedChain {
    /// Leaf certificate as submitted (base64 DER)
    pub leaf: String,

    /// Number of elements in the accepted chain
    pub length: usize,
}

/// Outcome of chain verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainVerdict {
    Accepted(AcceptedChain),
    Rejected(String),
}

/// Outcome of SCT verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SctVerdict {
    Accepted,
    Rejected(String),
}

/// Pluggable chain / SCT verifier
pub trait FeedbackVerifier: Send + Sync {
    /// Validate a leaf-first chain (and any hostname policy)
    fn verify_chain(&self, chain: &[String]) -> ChainVerdict;

    /// Validate one SCT against the accepted leaf
    fn verify_sct(&self, sct: &str, chain: &AcceptedChain) -> SctVerdict;
}
