//! Query entry points.
//!
//! [`QueryApi`] combines the injected header source, snapshot provider and
//! seal recovery into the public read operations. Every call is a
//! self-contained read: nothing is cached here and a failed fetch aborts the
//! whole query.

use crate::activity::ActivityTally;
use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::input::{decode_header_blob, SignerQuery};
use crate::types::{BlockId, EpochPerformance, Status};
use crate::walker::ChainWalk;
use sealwatch_consensus::{HeaderSource, SignerRecovery, Snapshot, SnapshotProvider};
use sealwatch_core::{Address, Hash, Header};
use tracing::debug;

/// Read-only authority queries over a chain.
pub struct QueryApi<H, S, R> {
    headers: H,
    snapshots: S,
    recovery: R,
    config: QueryConfig,
}

impl<H, S, R> QueryApi<H, S, R>
where
    H: HeaderSource,
    S: SnapshotProvider,
    R: SignerRecovery,
{
    /// Create a query API with the default configuration.
    pub fn new(headers: H, snapshots: S, recovery: R) -> Self {
        Self::with_config(headers, snapshots, recovery, QueryConfig::default())
    }

    pub fn with_config(headers: H, snapshots: S, recovery: R, config: QueryConfig) -> Self {
        Self {
            headers,
            snapshots,
            recovery,
            config,
        }
    }

    /// Settings the façade was built with.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Number of the current head, `None` on an empty chain.
    pub fn head_number(&self) -> Result<Option<u64>> {
        Ok(self.headers.current_header()?.map(|header| header.number))
    }

    // =========================================================================
    // Snapshots and signer sets
    // =========================================================================

    /// Get the snapshot effective at a block, the head when `block` is `None`.
    pub fn snapshot(&self, block: Option<BlockId>) -> Result<Snapshot> {
        let header = self.resolve(block)?;
        self.snapshot_of(&header)
    }

    /// Get the snapshot effective at the block with the given hash.
    pub fn snapshot_at_hash(&self, hash: &Hash) -> Result<Snapshot> {
        self.snapshot(Some(BlockId::Hash(*hash)))
    }

    /// Get the authorized signers at a block, the head when `block` is `None`.
    pub fn signers(&self, block: Option<BlockId>) -> Result<Vec<Address>> {
        Ok(self.snapshot(block)?.signers())
    }

    /// Get the authorized signers at the block with the given hash.
    pub fn signers_at_hash(&self, hash: &Hash) -> Result<Vec<Address>> {
        Ok(self.snapshot_at_hash(hash)?.signers())
    }

    // =========================================================================
    // Activity reports
    // =========================================================================

    /// Report signer activity over the recent window before the head.
    ///
    /// The window covers `[head - W, head)`. On a chain shorter than the
    /// window the range is clamped to start at block 1.
    pub fn status(&self) -> Result<Status> {
        let head = self.resolve(None)?;
        let snapshot = self.snapshot_of(&head)?;

        let end = head.number;
        let mut window = self.config.recent_window;
        let start = if window > end {
            window = end.saturating_sub(1);
            1
        } else {
            end - window
        };

        let mut tally = ActivityTally::seeded(snapshot.signers.iter().copied());
        for block in ChainWalk::range(&self.headers, &self.recovery, start..end) {
            tally.record(&block?);
        }

        let in_turn_percent = if window == 0 {
            0.0
        } else {
            tally.in_turn() as f64 * 100.0 / window as f64
        };
        debug!(start, end, in_turn = tally.in_turn(), "computed signing status");

        Ok(Status {
            in_turn_percent,
            num_blocks: window,
            signing_status: tally.into_status(),
        })
    }

    /// Report on the epoch that ended where the current one began.
    ///
    /// `epoch` is the epoch number the caller expects that epoch to carry.
    pub fn previous_epoch_performance(&self, epoch: u64) -> Result<EpochPerformance> {
        let head = self.resolve(None)?;
        let current = self.snapshot_of(&head)?;
        let (number, hash) = current.previous().ok_or(QueryError::NoPriorEpoch)?;

        let previous = self.snapshots.snapshot_at(number, &hash)?;
        check_epoch(&previous, epoch)?;
        self.walk_epoch(&previous, head.number)
    }

    /// Report on the epoch whose snapshot is effective at `epoch_block`.
    pub fn epoch_performance(&self, epoch: u64, epoch_block: u64) -> Result<EpochPerformance> {
        let header = self
            .headers
            .header_by_number(epoch_block)?
            .ok_or(QueryError::MissingEpochBlock(epoch_block))?;
        let snapshot = self.snapshot_of(&header)?;
        check_epoch(&snapshot, epoch)?;

        let head = self.resolve(None)?;
        self.walk_epoch(&snapshot, head.number)
    }

    // =========================================================================
    // Signer resolution
    // =========================================================================

    /// Get the address that sealed a block.
    pub fn signer(&self, query: &SignerQuery) -> Result<Address> {
        let header = match query {
            SignerQuery::ByBytes(blob) if !blob.is_empty() => decode_header_blob(blob)?,
            SignerQuery::ByBytes(_) => self.block_for_signer(None)?,
            SignerQuery::ById(id) => self.block_for_signer(*id)?,
        };
        Ok(self.recovery.recover(&header)?)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn lookup(&self, id: BlockId) -> Result<Option<Header>> {
        let header = match id {
            BlockId::Latest => self.headers.current_header()?,
            BlockId::Number(number) => self.headers.header_by_number(number)?,
            BlockId::Hash(hash) => self.headers.header_by_hash(&hash)?,
        };
        Ok(header)
    }

    fn resolve(&self, block: Option<BlockId>) -> Result<Header> {
        let id = block.unwrap_or(BlockId::Latest);
        self.lookup(id)?.ok_or(QueryError::UnknownBlock(id))
    }

    fn block_for_signer(&self, block: Option<BlockId>) -> Result<Header> {
        let id = block.unwrap_or(BlockId::Latest);
        self.lookup(id)?.ok_or(QueryError::MissingBlock(id))
    }

    fn snapshot_of(&self, header: &Header) -> Result<Snapshot> {
        Ok(self.snapshots.snapshot_at(header.number, &header.hash())?)
    }

    fn walk_epoch(&self, snapshot: &Snapshot, head: u64) -> Result<EpochPerformance> {
        let start_block = snapshot.number + 1;
        let mut tally = ActivityTally::seeded(snapshot.signers.iter().copied());
        let mut next_epoch = 0;

        for block in ChainWalk::epoch(&self.headers, &self.recovery, start_block, head) {
            let block = block?;
            tally.record(&block);
            if let Some(epoch) = block.next_epoch() {
                next_epoch = epoch;
            }
        }

        debug!(
            epoch = snapshot.epoch_number,
            start_block,
            num_blocks = tally.num_blocks(),
            next_epoch,
            "walked epoch"
        );

        Ok(EpochPerformance {
            in_turn_percent: tally.in_turn_percent(),
            num_blocks: tally.num_blocks(),
            next_epoch,
            start_block,
            signing_status: tally.into_status(),
        })
    }
}

fn check_epoch(snapshot: &Snapshot, expected: u64) -> Result<()> {
    if snapshot.epoch_number != expected {
        return Err(QueryError::EpochMismatch {
            expected,
            got: snapshot.epoch_number,
        });
    }
    Ok(())
}
