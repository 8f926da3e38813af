//! Per-signer block counting.

use crate::types::SigningStatus;
use crate::walker::WalkedBlock;
use sealwatch_core::Address;

/// Running tally of blocks, in-turn blocks and blocks per producer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityTally {
    num_blocks: u64,
    in_turn: u64,
    status: SigningStatus,
}

impl ActivityTally {
    /// Start a tally with every given signer at zero.
    pub fn seeded<I>(signers: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        Self {
            status: signers.into_iter().map(|signer| (signer, 0)).collect(),
            ..Self::default()
        }
    }

    /// Count one block.
    pub fn record(&mut self, block: &WalkedBlock) {
        self.num_blocks += 1;
        if block.in_turn {
            self.in_turn += 1;
        }
        *self.status.entry(block.producer).or_insert(0) += 1;
    }

    pub fn num_blocks(&self) -> u64 {
        self.num_blocks
    }

    pub fn in_turn(&self) -> u64 {
        self.in_turn
    }

    /// Share of in-turn blocks as a percentage; 0 when nothing was counted.
    pub fn in_turn_percent(&self) -> f64 {
        if self.num_blocks == 0 {
            return 0.0;
        }
        self.in_turn as f64 * 100.0 / self.num_blocks as f64
    }

    pub fn status(&self) -> &SigningStatus {
        &self.status
    }

    pub fn into_status(self) -> SigningStatus {
        self.status
    }
}
