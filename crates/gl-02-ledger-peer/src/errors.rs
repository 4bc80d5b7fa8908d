//! Error types for the ledger peer.

use shared_types::WireError;
use thiserror::Error;

/// Errors returned by the peer's client-facing operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeerError {
    /// The proposal is malformed or its signature does not verify.
    #[error("invalid proposal: {0}")]
    InvalidProposal(String),

    /// The transaction envelope is malformed or its signature does not verify.
    #[error("invalid transaction envelope: {0}")]
    InvalidEnvelope(String),

    /// The peer does not serve the requested channel.
    #[error("channel {0} not found")]
    ChannelNotFound(String),

    /// The requested contract is not deployed on the channel.
    #[error("chaincode {0} not found")]
    ChaincodeNotFound(String),

    /// The contract rejected the invocation. `message` is the contract's text.
    #[error("{message}")]
    Chaincode { status: u16, message: String },

    /// The ordering service is not accepting transactions.
    #[error("ordering service unavailable")]
    OrdererUnavailable,

    /// A wire message could not be encoded.
    #[error(transparent)]
    Wire(#[from] WireError),
}
