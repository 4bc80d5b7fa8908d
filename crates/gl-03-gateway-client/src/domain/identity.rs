//! # Client Identity
//!
//! The client signs proposals and transaction envelopes with an Ed25519
//! key. Its public [`Identity`] travels inside every proposal.

use ed25519_dalek::{Signer as _, SigningKey};
use shared_types::{Identity, Signature};

use crate::errors::ConfigError;

/// Produces signatures on behalf of the client identity.
pub trait Signer: Send + Sync {
    fn sign(&self, message: &[u8]) -> Signature;
}

/// Ed25519 signer holding the client's secret key.
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Generate a random key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Create from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Create from a hex-encoded 32-byte seed.
    pub fn from_hex_seed(seed: &str) -> Result<Self, ConfigError> {
        let bytes = hex::decode(seed.trim())
            .map_err(|e| ConfigError::InvalidIdentity(format!("seed is not hex: {}", e)))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ConfigError::InvalidIdentity("seed must be 32 bytes".into()))?;
        Ok(Self::from_seed(seed))
    }

    /// The public identity for this key under `msp_id`.
    pub fn identity(&self, msp_id: impl Into<String>) -> Identity {
        Identity::new(msp_id, self.signing_key.verifying_key().to_bytes().to_vec())
    }
}

impl Signer for Ed25519Signer {
    fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer").finish_non_exhaustive()
    }
}
