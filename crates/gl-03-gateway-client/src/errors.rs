//! # Error Types
//!
//! Failures surfaced to the caller of a transaction. Nothing is retried
//! internally; whether to retry is the caller's decision.

use shared_types::{TxId, TxValidationCode, WireError};
use std::time::Duration;
use thiserror::Error;

use crate::domain::Phase;

// =============================================================================
// GATEWAY ERRORS
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// A phase did not complete within its deadline.
    #[error("{phase} deadline of {deadline:?} exceeded")]
    DeadlineExceeded { phase: Phase, deadline: Duration },

    /// The evaluation was rejected. `message` is the ledger's text, unaltered.
    #[error("evaluate failed: {message}")]
    Evaluate { message: String },

    /// Endorsement was refused. `message` is the ledger's text, unaltered.
    #[error("endorse failed: {message}")]
    Endorse { message: String },

    /// The orderer rejected the transaction.
    #[error("submit failed: {message}")]
    Submit { message: String },

    /// The commit status could not be obtained.
    #[error("commit status failed: {message}")]
    CommitStatus { message: String },

    /// The transaction was ordered but invalidated at commit.
    #[error("transaction {tx_id} failed to commit with status code {code}")]
    CommitFailed { tx_id: TxId, code: TxValidationCode },

    /// The connection to the ledger is unusable.
    #[error("connection error: {0}")]
    Connection(String),

    /// The gateway has been closed.
    #[error("gateway is closed")]
    Closed,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl GatewayError {
    /// Map a connection failure in `phase` to the caller-facing error.
    pub fn from_connection(phase: Phase, err: ConnectionError) -> Self {
        match err {
            ConnectionError::Unavailable(reason) => GatewayError::Connection(reason),
            ConnectionError::Rejected(message) => match phase {
                Phase::Evaluate => GatewayError::Evaluate { message },
                Phase::Endorse => GatewayError::Endorse { message },
                Phase::Submit => GatewayError::Submit { message },
                Phase::CommitStatus => GatewayError::CommitStatus { message },
            },
        }
    }

    /// Outcome label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::DeadlineExceeded { .. } => "deadline_exceeded",
            GatewayError::CommitFailed { .. } => "commit_failed",
            _ => "error",
        }
    }
}

// =============================================================================
// CONNECTION ERRORS
// =============================================================================

/// Errors reported by a [`GatewayConnection`](crate::ports::GatewayConnection).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The ledger processed the request and refused it.
    #[error("{0}")]
    Rejected(String),

    /// The ledger could not be reached.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid deadline: {0}")]
    InvalidDeadline(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}
