use async_trait::async_trait;
use shared_types::{CommitStatus, ProposalResponse, SignedProposal, TransactionEnvelope};

use crate::errors::PeerError;

/// Client-facing peer protocol.
#[async_trait]
pub trait LedgerPeerApi: Send + Sync {
    /// Simulate a proposal and return its payload. Nothing is recorded.
    async fn evaluate(&self, proposal: &SignedProposal) -> Result<Vec<u8>, PeerError>;

    /// Simulate a proposal and return a signed endorsement of the outcome.
    async fn endorse(&self, proposal: &SignedProposal) -> Result<ProposalResponse, PeerError>;

    /// Hand an endorsed transaction to the ordering service.
    async fn submit(&self, envelope: TransactionEnvelope) -> Result<(), PeerError>;

    /// Wait for the final status of a submitted transaction.
    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, PeerError>;
}
