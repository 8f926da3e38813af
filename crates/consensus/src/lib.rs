//! Proof-of-authority consensus state, as seen by a reader.
//!
//! This crate provides the pieces of the authority engine that the query
//! layer consumes without ever mutating:
//! - Authorization snapshots (signer set, epoch number, back-link)
//! - The chain access traits: [`HeaderSource`], [`SnapshotProvider`],
//!   [`SignerRecovery`]
//! - Seal recovery for ed25519-sealed headers
//!
//! # Example
//!
//! ```rust
//! use sealwatch_consensus::{SealRecovery, SignerRecovery};
//! use sealwatch_core::{BlockNonce, Hash, Header, Keypair};
//!
//! let producer = Keypair::generate();
//! let header = Header::new(1, Hash::ZERO, 2, BlockNonce::DROP_VOTE).sealed(&producer);
//!
//! let recovery = SealRecovery::new();
//! assert_eq!(recovery.recover(&header).unwrap(), producer.address());
//! ```

pub mod error;
pub mod recovery;
pub mod snapshot;
pub mod source;

// Re-export commonly used types
pub use error::{RecoveryError, SnapshotError, SourceError};
pub use recovery::SealRecovery;
pub use snapshot::Snapshot;
pub use source::{HeaderSource, SignerRecovery, SnapshotProvider};

/// Block difficulty for in-turn signatures.
pub const DIFF_IN_TURN: u64 = 2;

/// Number of recently recovered block signers to keep in memory.
pub const INMEMORY_SIGNATURES: usize = 4096;
