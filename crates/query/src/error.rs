//! Errors returned by authority queries.
//!
//! Every error is terminal for the query that raised it: chain data read
//! here is already final, so a failure means inconsistent data or a bad
//! request, never a transient condition worth retrying.

use crate::types::BlockId;
use sealwatch_consensus::{RecoveryError, SnapshotError, SourceError};
use sealwatch_core::CodecError;
use thiserror::Error;

/// Errors that can occur while answering a query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown block {0}")]
    UnknownBlock(BlockId),

    #[error("missing block {0}")]
    MissingBlock(BlockId),

    #[error("missing epoch block {0}")]
    MissingEpochBlock(u64),

    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(#[from] SnapshotError),

    #[error("epoch number mismatch, expected={expected} got={got}")]
    EpochMismatch { expected: u64, got: u64 },

    #[error("requested epoch not found")]
    NoPriorEpoch,

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("signer recovery failed: {0}")]
    RecoveryFailure(#[from] RecoveryError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<CodecError> for QueryError {
    fn from(err: CodecError) -> Self {
        QueryError::MalformedInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
