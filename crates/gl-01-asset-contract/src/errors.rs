//! # Error Types
//!
//! All error types for contract execution and state access.

use thiserror::Error;

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors that abort a single contract transaction.
///
/// The `Display` text is what clients see: it is reported verbatim through
/// the endorsement response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Creation targets an existing key.
    #[error("The garment {id} already exists")]
    AlreadyExists { id: String },

    /// Read/update/delete/transfer targets a missing or empty-valued key.
    #[error("The garment {id} does not exist")]
    NotFound { id: String },

    /// The stored value is not a JSON object and cannot be modified.
    #[error("The garment {id} is not a valid record: {reason}")]
    Corrupt { id: String, reason: String },

    /// The wire-level function name is not one of the contract's operations.
    #[error("Function {0} is not defined by the garment contract")]
    UnknownFunction(String),

    /// Wrong number of positional arguments.
    #[error("Incorrect number of arguments for {function}: expected {expected}, got {actual}")]
    InvalidArguments {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// State store failure.
    #[error("state error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ContractError {
    /// Returns true if the error reflects a violated existence precondition.
    #[must_use]
    pub fn is_precondition_failure(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. } | Self::NotFound { .. })
    }
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Errors from state store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend failure.
    #[error("state store error: {0}")]
    Backend(String),
}

// =============================================================================
// DECODE ERRORS
// =============================================================================

/// A stored value failed structured decoding during a bulk read.
///
/// Never propagated: the bulk read substitutes the raw string and logs this.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("value at {key} is not valid JSON: {reason}")]
pub struct DecodeError {
    pub key: String,
    pub reason: String,
}
