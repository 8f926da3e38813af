//! Read-only access to chain data.
//!
//! The query layer never owns chain state: headers, snapshots and seal
//! recovery are injected through these traits.

use crate::error::{RecoveryError, SnapshotError, SourceError};
use crate::snapshot::Snapshot;
use sealwatch_core::{Address, Hash, Header};
use std::sync::Arc;

/// Canonical header lookups.
///
/// Headers returned for a given number or hash must never change.
pub trait HeaderSource: Send + Sync {
    /// Get the current head header, `None` on an empty chain.
    fn current_header(&self) -> Result<Option<Header>, SourceError>;

    /// Get the canonical header at a block number.
    fn header_by_number(&self, number: u64) -> Result<Option<Header>, SourceError>;

    /// Get a header by its hash.
    fn header_by_hash(&self, hash: &Hash) -> Result<Option<Header>, SourceError>;
}

/// Authorization snapshots computed by the authority engine.
pub trait SnapshotProvider: Send + Sync {
    /// Get the snapshot effective at the given block.
    fn snapshot_at(&self, number: u64, hash: &Hash) -> Result<Snapshot, SnapshotError>;
}

/// Recovery of the producer identity from a header seal.
pub trait SignerRecovery: Send + Sync {
    /// Get the address that sealed the header.
    fn recover(&self, header: &Header) -> Result<Address, RecoveryError>;
}

impl<T: HeaderSource + ?Sized> HeaderSource for Arc<T> {
    fn current_header(&self) -> Result<Option<Header>, SourceError> {
        (**self).current_header()
    }

    fn header_by_number(&self, number: u64) -> Result<Option<Header>, SourceError> {
        (**self).header_by_number(number)
    }

    fn header_by_hash(&self, hash: &Hash) -> Result<Option<Header>, SourceError> {
        (**self).header_by_hash(hash)
    }
}

impl<T: SnapshotProvider + ?Sized> SnapshotProvider for Arc<T> {
    fn snapshot_at(&self, number: u64, hash: &Hash) -> Result<Snapshot, SnapshotError> {
        (**self).snapshot_at(number, hash)
    }
}

impl<T: SignerRecovery + ?Sized> SignerRecovery for Arc<T> {
    fn recover(&self, header: &Header) -> Result<Address, RecoveryError> {
        (**self).recover(header)
    }
}
