//! Blocks and their byte encoding.

use crate::header::Header;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from decoding headers or blocks.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("decoding failed: {0}")]
    Decode(#[from] bincode::Error),
}

/// A complete block: a header plus opaque transaction payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block header, carrying the producer seal.
    pub header: Header,
    /// Encoded transactions; their contents are not interpreted here.
    pub transactions: Vec<Vec<u8>>,
}

impl Block {
    /// Create a block from a header and its transactions.
    pub fn new(header: Header, transactions: Vec<Vec<u8>>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Encode the block to its byte form.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("serialization should not fail")
    }

    /// Decode a block from its byte form.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::hash::Hash;
    use crate::header::BlockNonce;

    fn sample_header() -> Header {
        Header::new(12, Hash([4u8; 32]), 2, BlockNonce::DROP_VOTE).sealed(&Keypair::generate())
    }

    #[test]
    fn test_block_decode() {
        let block = Block::new(sample_header(), vec![vec![1, 2], vec![3]]);
        assert_eq!(Block::decode(&block.encode()).unwrap(), block);
    }

    #[test]
    fn test_header_bytes_are_not_a_block() {
        let header = sample_header();
        assert!(Block::decode(&header.encode()).is_err());
        assert_eq!(Header::decode(&header.encode()).unwrap(), header);
    }

    #[test]
    fn test_block_bytes_start_with_header() {
        let block = Block::new(sample_header(), vec![]);
        let header = Header::decode(&block.encode()).unwrap();
        assert_eq!(header, block.header);
    }
}
