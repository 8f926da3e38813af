//! Forward walk over canonical headers.
//!
//! [`ChainWalk`] yields one [`WalkedBlock`] per block number, fetching the
//! header and recovering its producer as it goes. It is lazy and finite: an
//! error or, for epoch walks, the boundary header ends the sequence.

use crate::error::{QueryError, Result};
use crate::types::BlockId;
use sealwatch_consensus::{HeaderSource, SignerRecovery, DIFF_IN_TURN};
use sealwatch_core::{Address, Header};
use std::iter::FusedIterator;
use std::ops::Range;

/// A header visited by a walk, classified and attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedBlock {
    pub header: Header,
    /// Whether the difficulty marks an in-turn block.
    pub in_turn: bool,
    /// Address recovered from the seal.
    pub producer: Address,
}

impl WalkedBlock {
    /// The epoch announced by this header, if it is an epoch boundary.
    pub fn next_epoch(&self) -> Option<u64> {
        (!self.header.nonce.is_drop_vote()).then(|| self.header.nonce.to_u64())
    }
}

/// Iterator over a contiguous range of canonical headers.
pub struct ChainWalk<'a, H, R> {
    headers: &'a H,
    recovery: &'a R,
    blocks: Range<u64>,
    stop_at_boundary: bool,
    done: bool,
}

impl<'a, H: HeaderSource, R: SignerRecovery> ChainWalk<'a, H, R> {
    /// Walk every block in `blocks`.
    pub fn range(headers: &'a H, recovery: &'a R, blocks: Range<u64>) -> Self {
        Self {
            headers,
            recovery,
            blocks,
            stop_at_boundary: false,
            done: false,
        }
    }

    /// Walk from `start` up to `head` inclusive, ending after the first
    /// epoch boundary header.
    pub fn epoch(headers: &'a H, recovery: &'a R, start: u64, head: u64) -> Self {
        Self {
            stop_at_boundary: true,
            ..Self::range(headers, recovery, start..head.saturating_add(1))
        }
    }

    fn visit(&self, number: u64) -> Result<WalkedBlock> {
        let header = self
            .headers
            .header_by_number(number)?
            .ok_or(QueryError::MissingBlock(BlockId::Number(number)))?;
        let producer = self.recovery.recover(&header)?;

        Ok(WalkedBlock {
            in_turn: header.difficulty == DIFF_IN_TURN,
            producer,
            header,
        })
    }
}

impl<H: HeaderSource, R: SignerRecovery> Iterator for ChainWalk<'_, H, R> {
    type Item = Result<WalkedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let number = self.blocks.next()?;

        let visited = self.visit(number);
        self.done = match &visited {
            Ok(block) => self.stop_at_boundary && block.next_epoch().is_some(),
            Err(_) => true,
        };
        Some(visited)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.blocks.size_hint().1)
        }
    }
}

impl<H: HeaderSource, R: SignerRecovery> FusedIterator for ChainWalk<'_, H, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use sealwatch_consensus::SealRecovery;
    use sealwatch_core::{BlockNonce, Hash, Keypair};
    use sealwatch_storage::MemoryChain;

    fn chain(nonces: &[BlockNonce], keypair: &Keypair) -> MemoryChain {
        let chain = MemoryChain::new();
        for (i, nonce) in nonces.iter().enumerate() {
            let number = i as u64 + 1;
            let difficulty = if number % 2 == 0 { 2 } else { 1 };
            chain.insert_header(Header::new(number, Hash::ZERO, difficulty, *nonce).sealed(keypair));
        }
        chain
    }

    #[test]
    fn test_range_walk_visits_each_block() {
        let keypair = Keypair::generate();
        let chain = chain(&[BlockNonce::DROP_VOTE; 4], &keypair);
        let recovery = SealRecovery::new();

        let blocks: Vec<_> = ChainWalk::range(&chain, &recovery, 1..5)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks.iter().map(|b| b.in_turn).collect::<Vec<_>>(),
            vec![false, true, false, true]
        );
        assert!(blocks.iter().all(|b| b.producer == keypair.address()));
    }

    #[test]
    fn test_range_walk_ignores_boundaries() {
        let keypair = Keypair::generate();
        let chain = chain(
            &[BlockNonce::DROP_VOTE, BlockNonce::from_u64(3), BlockNonce::DROP_VOTE],
            &keypair,
        );
        let recovery = SealRecovery::new();
        assert_eq!(ChainWalk::range(&chain, &recovery, 1..4).count(), 3);
    }

    #[test]
    fn test_epoch_walk_stops_after_boundary() {
        let keypair = Keypair::generate();
        let chain = chain(
            &[
                BlockNonce::DROP_VOTE,
                BlockNonce::from_u64(3),
                BlockNonce::DROP_VOTE,
            ],
            &keypair,
        );
        let recovery = SealRecovery::new();

        let blocks: Vec<_> = ChainWalk::epoch(&chain, &recovery, 1, 3)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].next_epoch(), Some(3));
        assert_eq!(blocks[0].next_epoch(), None);
    }

    #[test]
    fn test_epoch_walk_includes_head() {
        let keypair = Keypair::generate();
        let chain = chain(&[BlockNonce::DROP_VOTE; 3], &keypair);
        let recovery = SealRecovery::new();
        assert_eq!(ChainWalk::epoch(&chain, &recovery, 1, 3).count(), 3);
        assert_eq!(ChainWalk::epoch(&chain, &recovery, 4, 3).count(), 0);
    }

    #[test]
    fn test_missing_header_ends_walk() {
        let keypair = Keypair::generate();
        let chain = chain(&[BlockNonce::DROP_VOTE; 4], &keypair);
        chain.remove_header(2);
        let recovery = SealRecovery::new();

        let mut walk = ChainWalk::range(&chain, &recovery, 1..5);
        assert!(walk.next().unwrap().is_ok());
        assert!(matches!(
            walk.next(),
            Some(Err(QueryError::MissingBlock(BlockId::Number(2))))
        ));
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_unsealed_header_fails_recovery() {
        let chain = MemoryChain::new();
        chain.insert_header(Header::new(1, Hash::ZERO, 2, BlockNonce::DROP_VOTE));
        let recovery = SealRecovery::new();

        let result: Result<Vec<_>> = ChainWalk::range(&chain, &recovery, 1..2).collect();
        assert!(matches!(result, Err(QueryError::RecoveryFailure(_))));
    }
}
