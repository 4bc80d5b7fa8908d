//! Gateway connection to an in-process [`LedgerPeer`].

use async_trait::async_trait;
use gl_02_ledger_peer::{LedgerPeer, LedgerPeerApi, PeerError};
use gl_03_gateway_client::{ConnectionError, GatewayConnection};
use shared_types::{CommitStatus, ProposalResponse, SignedProposal, TransactionEnvelope};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Connects the gateway client directly to a peer in the same process.
pub struct InProcessConnection {
    peer: Arc<LedgerPeer>,
    closed: AtomicBool,
}

impl InProcessConnection {
    pub fn new(peer: Arc<LedgerPeer>) -> Self {
        Self {
            peer,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), ConnectionError> {
        if self.is_closed() {
            Err(ConnectionError::Unavailable("connection closed".into()))
        } else {
            Ok(())
        }
    }
}

fn to_connection_error(err: PeerError) -> ConnectionError {
    match err {
        PeerError::OrdererUnavailable => ConnectionError::Unavailable(err.to_string()),
        other => ConnectionError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl GatewayConnection for InProcessConnection {
    async fn evaluate(&self, proposal: &SignedProposal) -> Result<Vec<u8>, ConnectionError> {
        self.ensure_open()?;
        self.peer
            .evaluate(proposal)
            .await
            .map_err(to_connection_error)
    }

    async fn endorse(
        &self,
        proposal: &SignedProposal,
    ) -> Result<ProposalResponse, ConnectionError> {
        self.ensure_open()?;
        self.peer.endorse(proposal).await.map_err(to_connection_error)
    }

    async fn submit(&self, envelope: TransactionEnvelope) -> Result<(), ConnectionError> {
        self.ensure_open()?;
        self.peer.submit(envelope).await.map_err(to_connection_error)
    }

    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, ConnectionError> {
        self.ensure_open()?;
        self.peer
            .commit_status(tx_id)
            .await
            .map_err(to_connection_error)
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!("in-process connection closed");
        }
    }
}
