//! # Error Types
//!
//! Errors raised while encoding or verifying wire messages.

use thiserror::Error;

/// Errors that can occur while handling wire messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// A message could not be serialized for signing or transport.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The identity's credentials are not a valid Ed25519 verifying key.
    #[error("Invalid credentials for {msp_id}")]
    InvalidCredentials { msp_id: String },

    /// The signature does not match the signed bytes.
    #[error("Invalid signature")]
    InvalidSignature,
}

impl From<serde_json::Error> for WireError {
    fn from(e: serde_json::Error) -> Self {
        WireError::Serialization(e.to_string())
    }
}
