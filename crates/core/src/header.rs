//! Block headers and the nonce field that carries epoch boundaries.

use crate::block::CodecError;
use crate::crypto::Keypair;
use crate::hash::{hash, Hash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a header seal: a 32-byte ed25519 public key followed by a
/// 64-byte signature over the seal hash.
pub const SEAL_LENGTH: usize = 32 + 64;

/// The 8-byte nonce of a header.
///
/// Outside of epoch boundaries the nonce holds one of the two vote markers.
/// A boundary header carries the next epoch number, big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockNonce(pub [u8; 8]);

impl BlockNonce {
    /// Vote marker for removing a signer. Also the "no boundary" value.
    pub const DROP_VOTE: Self = Self([0x00; 8]);

    /// Vote marker for adding a signer.
    pub const AUTH_VOTE: Self = Self([0xff; 8]);

    /// Encode an integer big-endian.
    pub fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    /// Decode the nonce as a big-endian integer.
    pub fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Whether this nonce is the drop-vote marker.
    pub fn is_drop_vote(&self) -> bool {
        *self == Self::DROP_VOTE
    }
}

impl fmt::Debug for BlockNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockNonce(0x{})", hex::encode(self.0))
    }
}

/// A block header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Block number (0 for genesis).
    pub number: u64,
    /// Hash of the parent header.
    pub parent_hash: Hash,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    /// 2 when the producer was in turn, 1 otherwise.
    pub difficulty: u64,
    /// Vote marker, or the next epoch number on a boundary header.
    pub nonce: BlockNonce,
    /// Producer vanity bytes.
    pub extra: Vec<u8>,
    /// Producer seal, see [`SEAL_LENGTH`]. Empty on unsealed headers.
    pub seal: Vec<u8>,
}

/// The header fields covered by the seal signature.
#[derive(Serialize)]
struct SealedFields<'a> {
    number: u64,
    parent_hash: &'a Hash,
    timestamp: u64,
    difficulty: u64,
    nonce: &'a BlockNonce,
    extra: &'a [u8],
}

impl Header {
    /// Create an unsealed header.
    pub fn new(number: u64, parent_hash: Hash, difficulty: u64, nonce: BlockNonce) -> Self {
        Self {
            number,
            parent_hash,
            timestamp: 0,
            difficulty,
            nonce,
            extra: Vec::new(),
            seal: Vec::new(),
        }
    }

    /// Calculate the hash of this header, seal included.
    pub fn hash(&self) -> Hash {
        let encoded = bincode::serialize(self).expect("serialization should not fail");
        hash(&encoded)
    }

    /// Calculate the hash the producer signs: every field except the seal.
    pub fn seal_hash(&self) -> Hash {
        let fields = SealedFields {
            number: self.number,
            parent_hash: &self.parent_hash,
            timestamp: self.timestamp,
            difficulty: self.difficulty,
            nonce: &self.nonce,
            extra: &self.extra,
        };
        let encoded = bincode::serialize(&fields).expect("serialization should not fail");
        hash(&encoded)
    }

    /// Seal the header with the producer's keypair.
    pub fn sealed(mut self, keypair: &Keypair) -> Self {
        let signature = keypair.sign_hash(&self.seal_hash());
        let mut seal = Vec::with_capacity(SEAL_LENGTH);
        seal.extend_from_slice(&keypair.public_key.as_bytes());
        seal.extend_from_slice(signature.as_bytes());
        self.seal = seal;
        self
    }

    /// Encode the header to its byte form.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("serialization should not fail")
    }

    /// Decode a header from its byte form.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_big_endian() {
        let nonce = BlockNonce::from_u64(5);
        assert_eq!(nonce.0, [0, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(nonce.to_u64(), 5);
        assert!(BlockNonce::DROP_VOTE.is_drop_vote());
        assert!(!BlockNonce::AUTH_VOTE.is_drop_vote());
        assert_eq!(BlockNonce::AUTH_VOTE.to_u64(), u64::MAX);
    }

    #[test]
    fn test_seal_hash_ignores_seal() {
        let keypair = Keypair::generate();
        let header = Header::new(7, Hash::ZERO, 2, BlockNonce::DROP_VOTE);
        let sealed = header.clone().sealed(&keypair);

        assert_eq!(sealed.seal.len(), SEAL_LENGTH);
        assert_eq!(sealed.seal_hash(), header.seal_hash());
        assert_ne!(sealed.hash(), header.hash());
    }

    #[test]
    fn test_seal_hash_covers_nonce() {
        let a = Header::new(7, Hash::ZERO, 2, BlockNonce::DROP_VOTE);
        let b = Header::new(7, Hash::ZERO, 2, BlockNonce::from_u64(1));
        assert_ne!(a.seal_hash(), b.seal_hash());
    }

    #[test]
    fn test_encode_decode() {
        let header = Header::new(3, Hash([1u8; 32]), 1, BlockNonce::AUTH_VOTE)
            .sealed(&Keypair::generate());
        assert_eq!(Header::decode(&header.encode()).unwrap(), header);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(Header::decode(&[1, 2, 3]).is_err());
    }
}
