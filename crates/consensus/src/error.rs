//! Errors raised by the chain access collaborators.

use sealwatch_core::Hash;
use thiserror::Error;

/// A header or snapshot backend could not be read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("chain data backend: {0}")]
    Backend(String),
}

/// A snapshot could not be derived or found.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no snapshot available at block {number} ({hash})")]
    Unavailable { number: u64, hash: Hash },

    #[error("invalid snapshot anchored at block {number}: {reason}")]
    Invalid { number: u64, reason: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// The producer of a header could not be authenticated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("missing seal on block {number}: expected {expected} bytes, got {got}")]
    MissingSeal {
        number: u64,
        expected: usize,
        got: usize,
    },

    #[error("invalid seal public key on block {0}")]
    InvalidPublicKey(u64),

    #[error("seal verification failed on block {0}")]
    VerificationFailed(u64),
}
