//! Canonical header storage and chain head tracking.

use crate::db::{Result, Storage, StorageError};
use sealwatch_consensus::{HeaderSource, SourceError};
use sealwatch_core::{Hash, Header};

/// Keys for chain metadata.
const CHAIN_HEAD_KEY: &[u8] = b"chain:head";
const CHAIN_HEIGHT_KEY: &[u8] = b"chain:height";

/// Manages header storage and the chain head.
#[derive(Clone)]
pub struct HeaderStore {
    storage: Storage,
}

impl HeaderStore {
    /// Create a new HeaderStore over the given storage.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    // =========================================================================
    // Header Storage
    // =========================================================================

    /// Store a header with both number and hash indexes.
    ///
    /// - Primary: `header:hash:{hash}` → full header (immutable)
    /// - Secondary: `header:number:{number}` → hash of the canonical header
    pub fn put_header(&self, header: &Header) -> Result<()> {
        let hash = header.hash();
        self.storage.put(Storage::header_hash_key(&hash), header)?;
        self.storage
            .put(Storage::header_number_key(header.number), &hash)?;
        Ok(())
    }

    /// Get a header by its hash.
    pub fn get_header_by_hash(&self, hash: &Hash) -> Result<Option<Header>> {
        self.storage.get(Storage::header_hash_key(hash))
    }

    /// Get the canonical hash at a block number.
    pub fn get_canonical_hash(&self, number: u64) -> Result<Option<Hash>> {
        self.storage.get(Storage::header_number_key(number))
    }

    /// Get the canonical header at a block number.
    pub fn get_header_by_number(&self, number: u64) -> Result<Option<Header>> {
        match self.get_canonical_hash(number)? {
            Some(hash) => self.get_header_by_hash(&hash),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Chain Head Tracking
    // =========================================================================

    /// Get the current chain head hash.
    pub fn get_head(&self) -> Result<Option<Hash>> {
        self.storage.get(CHAIN_HEAD_KEY)
    }

    /// Get the current chain height.
    /// Returns 0 if the chain is not initialized.
    pub fn get_height(&self) -> Result<u64> {
        Ok(self.storage.get::<_, u64>(CHAIN_HEIGHT_KEY)?.unwrap_or(0))
    }

    fn set_head(&self, hash: &Hash, number: u64) -> Result<()> {
        self.storage.put(CHAIN_HEAD_KEY, hash)?;
        self.storage.put(CHAIN_HEIGHT_KEY, &number)?;
        Ok(())
    }

    /// Get the head header.
    pub fn get_latest_header(&self) -> Result<Option<Header>> {
        match self.get_head()? {
            Some(hash) => self.get_header_by_hash(&hash),
            None => Ok(None),
        }
    }

    /// Check if the chain is initialized (has a genesis header).
    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.get_head()?.is_some())
    }

    // =========================================================================
    // Chain Operations
    // =========================================================================

    /// Initialize the chain with a genesis header.
    pub fn init_genesis(&self, genesis: &Header) -> Result<()> {
        if genesis.number != 0 {
            return Err(StorageError::InvalidGenesis(
                "Genesis header must have number 0".into(),
            ));
        }
        if self.is_initialized()? {
            return Err(StorageError::InvalidGenesis(
                "Chain already initialized".into(),
            ));
        }

        self.put_header(genesis)?;
        self.set_head(&genesis.hash(), 0)
    }

    /// Append the next header to the chain.
    ///
    /// Checks that the number is exactly head + 1 and the parent hash matches
    /// the head. Seals are not checked here.
    pub fn append_header(&self, header: &Header) -> Result<()> {
        let head = self
            .get_head()?
            .ok_or_else(|| StorageError::InvalidHeader("Chain not initialized".into()))?;
        let height = self.get_height()?;

        if header.number != height + 1 {
            return Err(StorageError::InvalidHeader(format!(
                "Expected header number {}, got {}",
                height + 1,
                header.number
            )));
        }
        if header.parent_hash != head {
            return Err(StorageError::InvalidHeader(format!(
                "Header parent_hash {} doesn't match chain head {}",
                header.parent_hash, head
            )));
        }

        self.put_header(header)?;
        self.set_head(&header.hash(), header.number)
    }
}

impl HeaderSource for HeaderStore {
    fn current_header(&self) -> std::result::Result<Option<Header>, SourceError> {
        Ok(self.get_latest_header()?)
    }

    fn header_by_number(&self, number: u64) -> std::result::Result<Option<Header>, SourceError> {
        Ok(self.get_header_by_number(number)?)
    }

    fn header_by_hash(&self, hash: &Hash) -> std::result::Result<Option<Header>, SourceError> {
        Ok(self.get_header_by_hash(hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealwatch_core::{BlockNonce, Keypair};

    fn setup() -> HeaderStore {
        HeaderStore::new(Storage::open_temporary().unwrap())
    }

    fn child(parent: &Header, keypair: &Keypair) -> Header {
        Header::new(parent.number + 1, parent.hash(), 2, BlockNonce::DROP_VOTE).sealed(keypair)
    }

    fn genesis() -> Header {
        Header::new(0, Hash::ZERO, 1, BlockNonce::DROP_VOTE)
    }

    #[test]
    fn test_genesis_init() {
        let chain = setup();
        assert!(!chain.is_initialized().unwrap());

        let genesis = genesis();
        chain.init_genesis(&genesis).unwrap();

        assert!(chain.is_initialized().unwrap());
        assert_eq!(chain.get_height().unwrap(), 0);
        assert_eq!(chain.get_head().unwrap(), Some(genesis.hash()));
        assert!(matches!(
            chain.init_genesis(&genesis),
            Err(StorageError::InvalidGenesis(_))
        ));
    }

    #[test]
    fn test_append_and_lookup() {
        let chain = setup();
        let keypair = Keypair::generate();
        let genesis = genesis();
        chain.init_genesis(&genesis).unwrap();

        let h1 = child(&genesis, &keypair);
        let h2 = child(&h1, &keypair);
        chain.append_header(&h1).unwrap();
        chain.append_header(&h2).unwrap();

        assert_eq!(chain.get_height().unwrap(), 2);
        assert_eq!(chain.get_header_by_number(1).unwrap(), Some(h1.clone()));
        assert_eq!(chain.get_header_by_hash(&h2.hash()).unwrap(), Some(h2.clone()));
        assert_eq!(chain.current_header().unwrap(), Some(h2));
        assert_eq!(chain.header_by_number(3).unwrap(), None);
    }

    #[test]
    fn test_append_wrong_number_fails() {
        let chain = setup();
        let genesis = genesis();
        chain.init_genesis(&genesis).unwrap();

        let header = Header::new(5, genesis.hash(), 2, BlockNonce::DROP_VOTE);
        assert!(matches!(
            chain.append_header(&header),
            Err(StorageError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_append_wrong_parent_fails() {
        let chain = setup();
        chain.init_genesis(&genesis()).unwrap();

        let header = Header::new(1, Hash([0xFF; 32]), 2, BlockNonce::DROP_VOTE);
        assert!(matches!(
            chain.append_header(&header),
            Err(StorageError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_append_before_genesis_fails() {
        let chain = setup();
        let header = Header::new(1, Hash::ZERO, 2, BlockNonce::DROP_VOTE);
        assert!(chain.append_header(&header).is_err());
    }
}
