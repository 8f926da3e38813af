#![allow(dead_code)]

use sealwatch_consensus::{SealRecovery, Snapshot};
use sealwatch_core::{Address, BlockNonce, Hash, Header, Keypair};
use sealwatch_query::QueryApi;
use sealwatch_storage::MemoryChain;
use std::sync::Arc;

pub type TestApi = QueryApi<Arc<MemoryChain>, Arc<MemoryChain>, SealRecovery>;

/// Builds a sealed chain with epoch snapshots in memory.
pub struct ChainBuilder {
    pub chain: Arc<MemoryChain>,
    pub keys: Vec<Keypair>,
    pub headers: Vec<Header>,
    pub snapshots: Vec<Snapshot>,
    authorized: Vec<Address>,
}

impl ChainBuilder {
    /// Chain with `signers` keys, all authorized from genesis.
    pub fn new(signers: usize) -> Self {
        Self::with_authorized(signers, signers)
    }

    /// Chain with `keys` keys of which only the first `authorized` are in
    /// the signer set.
    pub fn with_authorized(keys: usize, authorized: usize) -> Self {
        let keys: Vec<Keypair> = (0..keys)
            .map(|i| Keypair::from_private_key(&[i as u8 + 1; 32]))
            .collect();
        let authorized: Vec<Address> = keys.iter().take(authorized).map(Keypair::address).collect();

        let genesis = Header::new(0, Hash::ZERO, 1, BlockNonce::DROP_VOTE);
        let snapshot = Snapshot::new(0, genesis.hash(), 0, authorized.clone());

        let chain = Arc::new(MemoryChain::new());
        chain.insert_header(genesis.clone());
        chain.insert_snapshot(snapshot.clone());

        Self {
            chain,
            keys,
            headers: vec![genesis],
            snapshots: vec![snapshot],
            authorized,
        }
    }

    pub fn head(&self) -> &Header {
        self.headers.last().unwrap()
    }

    pub fn address(&self, key: usize) -> Address {
        self.keys[key].address()
    }

    /// Seal the next block with `producer`.
    pub fn push(&mut self, producer: usize, in_turn: bool) -> Header {
        self.seal_next(producer, in_turn, BlockNonce::DROP_VOTE)
    }

    /// Seal `count` blocks, rotating producers, all in-turn or all not.
    pub fn extend(&mut self, count: u64, in_turn: bool) {
        for _ in 0..count {
            let producer = (self.head().number + 1) as usize % self.keys.len();
            self.push(producer, in_turn);
        }
    }

    /// Seal an epoch boundary announcing `next_epoch` and anchor the new
    /// epoch's snapshot on it.
    pub fn push_boundary(&mut self, producer: usize, next_epoch: u64) -> Header {
        let header = self.seal_next(producer, true, BlockNonce::from_u64(next_epoch));
        let previous = self.snapshots.last().unwrap();
        let snapshot = Snapshot::new(header.number, header.hash(), next_epoch, self.authorized.clone())
            .following(previous);

        self.chain.insert_snapshot(snapshot.clone());
        self.snapshots.push(snapshot);
        header
    }

    pub fn api(&self) -> TestApi {
        QueryApi::new(self.chain.clone(), self.chain.clone(), SealRecovery::new())
    }

    fn seal_next(&mut self, producer: usize, in_turn: bool, nonce: BlockNonce) -> Header {
        let parent = self.head();
        let difficulty = if in_turn { 2 } else { 1 };
        let mut header = Header::new(parent.number + 1, parent.hash(), difficulty, nonce);
        header.timestamp = parent.timestamp + 5;
        let header = header.sealed(&self.keys[producer]);

        self.chain.insert_header(header.clone());
        self.headers.push(header.clone());
        header
    }
}
