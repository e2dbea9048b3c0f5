//! Feedback verifiers and the filter that applies them before storage

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::traits::{AcceptedChain, ChainVerdict, FeedbackEntry, FeedbackVerifier, SctVerdict};

/// Accepts every chain and every SCT
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveVerifier;

impl FeedbackVerifier for PermissiveVerifier {
    fn verify_chain(&self, chain: &[String]) -> ChainVerdict {
        match chain.first() {
            Some(leaf) => ChainVerdict::Accepted(AcceptedChain {
                leaf: leaf.clone(),
                length: chain.len(),
            }),
            None => ChainVerdict::Rejected("empty chain".into()),
        }
    }

    fn verify_sct(&self, _sct: &str, _chain: &AcceptedChain) -> SctVerdict {
        SctVerdict::Accepted
    }
}

/// Structural check only: every chain element and SCT must be non-empty
/// standard base64. No signature or issuer validation is done.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingVerifier;

impl EncodingVerifier {
    fn check(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("empty value".into());
        }
        STANDARD
            .decode(value)
            .map(|_| ())
            .map_err(|e| format!("not base64: {}", e))
    }
}

impl FeedbackVerifier for EncodingVerifier {
    fn verify_chain(&self, chain: &[String]) -> ChainVerdict {
        let Some(leaf) = chain.first() else {
            return ChainVerdict::Rejected("empty chain".into());
        };
        for (i, cert) in chain.iter().enumerate() {
            if let Err(reason) = Self::check(cert) {
                return ChainVerdict::Rejected(format!("certificate {}: {}", i, reason));
            }
        }
        ChainVerdict::Accepted(AcceptedChain {
            leaf: leaf.clone(),
            length: chain.len(),
        })
    }

    fn verify_sct(&self, sct: &str, _chain: &AcceptedChain) -> SctVerdict {
        match Self::check(sct) {
            Ok(()) => SctVerdict::Accepted,
            Err(reason) => SctVerdict::Rejected(reason),
        }
    }
}

/// Drop rejected chains and strip rejected SCTs.
///
/// A chain whose SCTs are all rejected is still kept, so its identity is
/// recorded.
pub fn filter_feedback(
    verifier: &dyn FeedbackVerifier,
    entries: Vec<FeedbackEntry>,
) -> Vec<FeedbackEntry> {
    let mut accepted = Vec::with_capacity(entries.len());

    for entry in entries {
        let chain = match verifier.verify_chain(&entry.x509_chain) {
            ChainVerdict::Accepted(chain) => chain,
            ChainVerdict::Rejected(reason) => {
                tracing::warn!(
                    chain_len = entry.x509_chain.len(),
                    reason = %reason,
                    "Dropping feedback with rejected chain"
                );
                continue;
            }
        };

        let sct_data = entry
            .sct_data
            .into_iter()
            .filter(|sct| match verifier.verify_sct(sct, &chain) {
                SctVerdict::Accepted => true,
                SctVerdict::Rejected(reason) => {
                    tracing::warn!(
                        chain_len = chain.length,
                        reason = %reason,
                        "Stripping rejected SCT"
                    );
                    false
                }
            })
            .collect();

        accepted.push(FeedbackEntry {
            x509_chain: entry.x509_chain,
            sct_data,
        });
    }

    accepted
}
