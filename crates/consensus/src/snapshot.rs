//! Authorization snapshot: the signer set effective at a given block.

use crate::error::SnapshotError;
use sealwatch_core::{Address, Hash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot is the state of the authorization at a given point in time.
///
/// Snapshots are anchored to the header that opened their epoch and carry a
/// back-link to the snapshot of the previous epoch. Only the genesis epoch has
/// no back-link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Block number where the snapshot was created.
    pub number: u64,

    /// Block hash where the snapshot was created.
    pub hash: Hash,

    /// Epoch this snapshot governs.
    pub epoch_number: u64,

    /// Set of authorized signers at this moment.
    pub signers: BTreeSet<Address>,

    /// Anchor number of the previous epoch's snapshot.
    pub previous_snapshot_number: Option<u64>,

    /// Anchor hash of the previous epoch's snapshot.
    pub previous_snapshot_hash: Option<Hash>,
}

impl Snapshot {
    /// Create a snapshot without a back-link, as for the genesis epoch.
    pub fn new(
        number: u64,
        hash: Hash,
        epoch_number: u64,
        signers: impl IntoIterator<Item = Address>,
    ) -> Self {
        Self {
            number,
            hash,
            epoch_number,
            signers: signers.into_iter().collect(),
            previous_snapshot_number: None,
            previous_snapshot_hash: None,
        }
    }

    /// Link this snapshot to the one of the previous epoch.
    pub fn following(mut self, previous: &Snapshot) -> Self {
        self.previous_snapshot_number = Some(previous.number);
        self.previous_snapshot_hash = Some(previous.hash);
        self
    }

    /// Get the list of authorized signers in ascending order.
    pub fn signers(&self) -> Vec<Address> {
        self.signers.iter().copied().collect()
    }

    /// Anchor of the previous epoch's snapshot, if this is not the genesis epoch.
    pub fn previous(&self) -> Option<(u64, Hash)> {
        match (self.previous_snapshot_number, self.previous_snapshot_hash) {
            (Some(number), Some(hash)) => Some((number, hash)),
            _ => None,
        }
    }

    /// Check the invariants a snapshot holds on its own.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.signers.is_empty() {
            return Err(self.invalid("empty signer set"));
        }
        if self.previous_snapshot_number.is_some() != self.previous_snapshot_hash.is_some() {
            return Err(self.invalid("partial back-link"));
        }
        if let Some((number, _)) = self.previous() {
            if number >= self.number {
                return Err(self.invalid(format!(
                    "back-link to block {number} does not precede the anchor"
                )));
            }
        }
        Ok(())
    }

    /// Check that `previous` is the snapshot this one links back to.
    pub fn validate_link(&self, previous: &Snapshot) -> Result<(), SnapshotError> {
        if self.previous() != Some((previous.number, previous.hash)) {
            return Err(self.invalid(format!(
                "back-link does not point at snapshot {}",
                previous.number
            )));
        }
        if previous.epoch_number >= self.epoch_number {
            return Err(self.invalid(format!(
                "epoch {} does not follow epoch {}",
                self.epoch_number, previous.epoch_number
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> SnapshotError {
        SnapshotError::Invalid {
            number: self.number,
            reason: reason.into(),
        }
    }
}
