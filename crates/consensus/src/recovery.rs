//! Producer recovery from ed25519 header seals.

use crate::error::RecoveryError;
use crate::source::SignerRecovery;
use crate::INMEMORY_SIGNATURES;
use lru::LruCache;
use parking_lot::Mutex;
use sealwatch_core::{Address, Hash, Header, PublicKey, Signature, SEAL_LENGTH};
use std::num::NonZeroUsize;
use tracing::trace;

/// Recovers the producer of a header from its seal.
///
/// The seal carries the producer's public key and a signature over the seal
/// hash; the signer is the address of that key once the signature checks out.
/// Recovered signers are cached by header hash.
pub struct SealRecovery {
    signatures: Mutex<LruCache<Hash, Address>>,
}

impl SealRecovery {
    /// Create a recovery with the default cache size.
    pub fn new() -> Self {
        Self::with_capacity(INMEMORY_SIGNATURES)
    }

    /// Create a recovery caching up to `capacity` signers.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            signatures: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.signatures.lock().len()
    }

    fn verify_seal(header: &Header) -> Result<Address, RecoveryError> {
        if header.seal.len() != SEAL_LENGTH {
            return Err(RecoveryError::MissingSeal {
                number: header.number,
                expected: SEAL_LENGTH,
                got: header.seal.len(),
            });
        }
        let (key, signature) = header.seal.split_at(32);

        let public_key = PublicKey::from_slice(key)
            .map_err(|_| RecoveryError::InvalidPublicKey(header.number))?;
        let signature = Signature::from_slice(signature)
            .map_err(|_| RecoveryError::VerificationFailed(header.number))?;

        public_key
            .verify(header.seal_hash().as_bytes(), &signature)
            .map_err(|_| RecoveryError::VerificationFailed(header.number))?;

        Ok(public_key.to_address())
    }
}

impl Default for SealRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl SignerRecovery for SealRecovery {
    fn recover(&self, header: &Header) -> Result<Address, RecoveryError> {
        let hash = header.hash();
        if let Some(address) = self.signatures.lock().get(&hash) {
            return Ok(*address);
        }

        let address = Self::verify_seal(header)?;
        trace!(number = header.number, %address, "recovered block signer");

        self.signatures.lock().put(hash, address);
        Ok(address)
    }
}
