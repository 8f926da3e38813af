//! Core chain primitives for sealwatch.
//!
//! This crate provides the fundamental types shared by every other crate:
//! - Blake3 hashes and 20-byte addresses
//! - Ed25519 keys and signatures used by block seals
//! - Block headers, including the difficulty and nonce fields the
//!   authority reports are built from
//! - Blocks and their byte encoding

pub mod block;
pub mod crypto;
pub mod hash;
pub mod header;

// Re-export commonly used types at the crate root
pub use block::{Block, CodecError};
pub use crypto::{Address, CryptoError, Keypair, PublicKey, Signature};
pub use hash::{hash, Hash, H256};
pub use header::{BlockNonce, Header, SEAL_LENGTH};
