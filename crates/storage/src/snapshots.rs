//! Snapshot storage keyed by anchor block.
//!
//! The authority engine writes one snapshot per epoch, anchored at the header
//! that opened the epoch. The snapshot effective at a block is the one with
//! the greatest anchor not above it.

use crate::chain::HeaderStore;
use crate::db::{Result, Storage, StorageError};
use sealwatch_consensus::{Snapshot, SnapshotError, SnapshotProvider};
use sealwatch_core::Hash;
use tracing::debug;

/// Reads and writes authorization snapshots.
#[derive(Clone)]
pub struct SnapshotStore {
    storage: Storage,
    headers: HeaderStore,
}

impl SnapshotStore {
    /// Create a new SnapshotStore over the given storage.
    pub fn new(storage: Storage) -> Self {
        let headers = HeaderStore::new(storage.clone());
        Self { storage, headers }
    }

    /// Store a snapshot computed by the authority engine.
    ///
    /// The snapshot must be valid on its own, and its back-link must point at
    /// an already stored snapshot of a lower epoch.
    pub fn put_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        snapshot.validate()?;
        if let Some((number, _)) = snapshot.previous() {
            let previous = self
                .get_snapshot(number)?
                .ok_or_else(|| StorageError::NotFound(format!("snapshot {number}")))?;
            snapshot.validate_link(&previous)?;
        }

        self.storage
            .put(Storage::snapshot_key(snapshot.number), snapshot)?;
        debug!(
            number = snapshot.number,
            epoch = snapshot.epoch_number,
            signers = snapshot.signers.len(),
            "stored snapshot"
        );
        Ok(())
    }

    /// Get the snapshot anchored exactly at `number`.
    pub fn get_snapshot(&self, number: u64) -> Result<Option<Snapshot>> {
        self.storage.get(Storage::snapshot_key(number))
    }

    /// Get the snapshot with the greatest anchor not above `number`.
    pub fn get_effective_snapshot(&self, number: u64) -> Result<Option<Snapshot>> {
        self.storage
            .last_in_range(&Storage::snapshot_key(0), &Storage::snapshot_key(number))
    }
}

impl SnapshotProvider for SnapshotStore {
    fn snapshot_at(&self, number: u64, hash: &Hash) -> std::result::Result<Snapshot, SnapshotError> {
        let unavailable = || SnapshotError::Unavailable {
            number,
            hash: *hash,
        };

        let canonical = self.headers.get_canonical_hash(number)?;
        if canonical.as_ref() != Some(hash) {
            return Err(unavailable());
        }

        self.get_effective_snapshot(number)?.ok_or_else(unavailable)
    }
}

impl From<StorageError> for SnapshotError {
    fn from(err: StorageError) -> Self {
        SnapshotError::Source(err.into())
    }
}
