//! sled database wrapper with serialization helpers.

use sealwatch_consensus::{SnapshotError, SourceError};
use sealwatch_core::Hash;
use sled::Db;
use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}

impl From<StorageError> for SourceError {
    fn from(err: StorageError) -> Self {
        SourceError::Backend(err.to_string())
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Wrapper around sled database with serialization helpers.
///
/// Cloning is cheap and every clone shares the same database.
#[derive(Clone)]
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Open an in-memory database (for testing).
    pub fn open_temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    /// Store a serializable value.
    pub fn put<K, V>(&self, key: K, value: &V) -> Result<()>
    where
        K: AsRef<[u8]>,
        V: serde::Serialize,
    {
        let encoded = bincode::serialize(value)?;
        self.db.insert(key, encoded)?;
        Ok(())
    }

    /// Retrieve and deserialize a value.
    pub fn get<K, V>(&self, key: K) -> Result<Option<V>>
    where
        K: AsRef<[u8]>,
        V: serde::de::DeserializeOwned,
    {
        match self.db.get(key)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Retrieve the value with the greatest key inside `[from, to]`.
    pub fn last_in_range<V>(&self, from: &[u8], to: &[u8]) -> Result<Option<V>>
    where
        V: serde::de::DeserializeOwned,
    {
        match self.db.range(from..=to).next_back() {
            Some(entry) => {
                let (_, bytes) = entry?;
                Ok(Some(bincode::deserialize(&bytes)?))
            }
            None => Ok(None),
        }
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    // =========================================================================
    // Key Construction Helpers
    // =========================================================================

    /// Create a prefixed key for header hashes by number.
    /// Format: "header:number:" + big-endian number, so keys sort by number.
    pub fn header_number_key(number: u64) -> Vec<u8> {
        let mut key = b"header:number:".to_vec();
        key.extend_from_slice(&number.to_be_bytes());
        key
    }

    /// Create a prefixed key for headers by hash.
    /// Format: "header:hash:" + hash_bytes
    pub fn header_hash_key(hash: &Hash) -> Vec<u8> {
        let mut key = b"header:hash:".to_vec();
        key.extend_from_slice(&hash.0);
        key
    }

    /// Create a prefixed key for snapshots by anchor number.
    /// Format: "snapshot:" + big-endian number, so keys sort by number.
    pub fn snapshot_key(number: u64) -> Vec<u8> {
        let mut key = b"snapshot:".to_vec();
        key.extend_from_slice(&number.to_be_bytes());
        key
    }
}
