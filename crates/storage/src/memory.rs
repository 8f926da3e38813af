//! In-memory chain data.
//!
//! [`MemoryChain`] implements both [`HeaderSource`] and [`SnapshotProvider`]
//! with the same lookup rules as the sled-backed stores, for testing and for
//! embedding the query layer next to an engine that keeps its chain in memory.

use parking_lot::RwLock;
use sealwatch_consensus::{HeaderSource, Snapshot, SnapshotError, SnapshotProvider, SourceError};
use sealwatch_core::{Hash, Header};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct Inner {
    /// Headers indexed by number.
    headers: BTreeMap<u64, Header>,
    /// Header hash to number mapping for lookups by hash.
    numbers: HashMap<Hash, u64>,
    /// Snapshots indexed by anchor number.
    snapshots: BTreeMap<u64, Snapshot>,
}

/// Thread-safe in-memory chain.
#[derive(Debug, Default)]
pub struct MemoryChain {
    inner: RwLock<Inner>,
}

impl MemoryChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header as the canonical one at its number.
    pub fn insert_header(&self, header: Header) {
        let mut inner = self.inner.write();
        if let Some(replaced) = inner.headers.insert(header.number, header.clone()) {
            inner.numbers.remove(&replaced.hash());
        }
        inner.numbers.insert(header.hash(), header.number);
    }

    /// Drop the canonical header at `number`, leaving a gap.
    pub fn remove_header(&self, number: u64) -> Option<Header> {
        let mut inner = self.inner.write();
        let removed = inner.headers.remove(&number)?;
        inner.numbers.remove(&removed.hash());
        Some(removed)
    }

    /// Insert a snapshot at its anchor number.
    pub fn insert_snapshot(&self, snapshot: Snapshot) {
        self.inner.write().snapshots.insert(snapshot.number, snapshot);
    }
}

impl HeaderSource for MemoryChain {
    fn current_header(&self) -> Result<Option<Header>, SourceError> {
        Ok(self.inner.read().headers.values().next_back().cloned())
    }

    fn header_by_number(&self, number: u64) -> Result<Option<Header>, SourceError> {
        Ok(self.inner.read().headers.get(&number).cloned())
    }

    fn header_by_hash(&self, hash: &Hash) -> Result<Option<Header>, SourceError> {
        let inner = self.inner.read();
        Ok(inner
            .numbers
            .get(hash)
            .and_then(|number| inner.headers.get(number))
            .cloned())
    }
}

impl SnapshotProvider for MemoryChain {
    fn snapshot_at(&self, number: u64, hash: &Hash) -> Result<Snapshot, SnapshotError> {
        let inner = self.inner.read();
        if inner.numbers.get(hash) != Some(&number) {
            return Err(SnapshotError::Unavailable {
                number,
                hash: *hash,
            });
        }

        inner
            .snapshots
            .range(..=number)
            .next_back()
            .map(|(_, snapshot)| snapshot.clone())
            .ok_or(SnapshotError::Unavailable {
                number,
                hash: *hash,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealwatch_core::{Address, BlockNonce};

    fn header(number: u64) -> Header {
        Header::new(number, Hash([number as u8; 32]), 2, BlockNonce::DROP_VOTE)
    }

    #[test]
    fn test_header_lookups() {
        let chain = MemoryChain::new();
        assert_eq!(chain.current_header().unwrap(), None);

        for number in 0..4 {
            chain.insert_header(header(number));
        }
        assert_eq!(chain.current_header().unwrap(), Some(header(3)));
        assert_eq!(chain.header_by_number(2).unwrap(), Some(header(2)));
        assert_eq!(chain.header_by_hash(&header(1).hash()).unwrap(), Some(header(1)));
        assert_eq!(chain.header_by_hash(&Hash::ZERO).unwrap(), None);
    }

    #[test]
    fn test_replaced_header_loses_hash_index() {
        let chain = MemoryChain::new();
        chain.insert_header(header(1));
        let mut replacement = header(1);
        replacement.difficulty = 1;
        chain.insert_header(replacement.clone());

        assert_eq!(chain.header_by_hash(&header(1).hash()).unwrap(), None);
        assert_eq!(chain.header_by_number(1).unwrap(), Some(replacement));
    }

    #[test]
    fn test_remove_header_leaves_gap() {
        let chain = MemoryChain::new();
        for number in 0..3 {
            chain.insert_header(header(number));
        }
        assert!(chain.remove_header(1).is_some());
        assert_eq!(chain.header_by_number(1).unwrap(), None);
        assert_eq!(chain.current_header().unwrap(), Some(header(2)));
    }

    #[test]
    fn test_snapshot_lookup() {
        let chain = MemoryChain::new();
        for number in 0..8 {
            chain.insert_header(header(number));
        }
        let signers = vec![Address([1u8; 20])];
        let genesis = Snapshot::new(0, header(0).hash(), 0, signers.clone());
        let next = Snapshot::new(5, header(5).hash(), 1, signers).following(&genesis);
        chain.insert_snapshot(genesis.clone());
        chain.insert_snapshot(next.clone());

        assert_eq!(chain.snapshot_at(4, &header(4).hash()).unwrap(), genesis);
        assert_eq!(chain.snapshot_at(7, &header(7).hash()).unwrap(), next);
        assert!(chain.snapshot_at(7, &header(6).hash()).is_err());
    }
}
