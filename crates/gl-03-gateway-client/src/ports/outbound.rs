//! # Outbound Ports
//!
//! One method per protocol round trip. Implementations perform the call and
//! nothing else: deadlines, signing and status interpretation belong to the
//! gateway.

use async_trait::async_trait;
use shared_types::{CommitStatus, ProposalResponse, SignedProposal, TransactionEnvelope};

use crate::errors::ConnectionError;

/// A connection to a ledger peer.
#[async_trait]
pub trait GatewayConnection: Send + Sync {
    /// Run a read-only query and return its payload.
    async fn evaluate(&self, proposal: &SignedProposal) -> Result<Vec<u8>, ConnectionError>;

    /// Obtain an endorsement for a proposal.
    async fn endorse(&self, proposal: &SignedProposal)
        -> Result<ProposalResponse, ConnectionError>;

    /// Send an endorsed transaction for ordering.
    async fn submit(&self, envelope: TransactionEnvelope) -> Result<(), ConnectionError>;

    /// Wait for the commit status of `tx_id`.
    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, ConnectionError>;

    /// Release the connection. Called at most once by the gateway.
    async fn close(&self);
}
