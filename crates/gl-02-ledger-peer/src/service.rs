//! # Ledger Peer Service
//!
//! Wires the world state, the simulator, the garment contract and the
//! ordering task into a single endorsing and committing peer.

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use gl_01_asset_contract::{invoke, GarmentContract};
use parking_lot::{Mutex, RwLock};
use shared_types::{
    verify_envelope, verify_signed_proposal, ChaincodeResponse, CommitStatus, Endorsement,
    Identity, Proposal, ProposalResponse, ReadWriteSet, SignedProposal, TransactionEnvelope,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::adapters::TxSimulator;
use crate::domain::{Block, PeerConfig, WorldState};
use crate::errors::PeerError;
use crate::ordering::{run_orderer, Committer, StatusBoard};
use crate::ports::LedgerPeerApi;

/// An in-process endorsing and committing peer with its own ordering task.
pub struct LedgerPeer {
    config: PeerConfig,
    identity: Identity,
    signing_key: SigningKey,
    state: Arc<RwLock<WorldState>>,
    statuses: Arc<StatusBoard>,
    committer: Arc<Committer>,
    queue: Mutex<Option<mpsc::Sender<TransactionEnvelope>>>,
    orderer: Mutex<Option<JoinHandle<()>>>,
}

impl LedgerPeer {
    /// Start a peer with empty state. Must be called within a Tokio runtime.
    pub fn start(config: PeerConfig, signing_key: SigningKey) -> Self {
        let identity = Identity::new(
            config.msp_id.clone(),
            signing_key.verifying_key().to_bytes().to_vec(),
        );
        let state = Arc::new(RwLock::new(WorldState::new()));
        let statuses = Arc::new(StatusBoard::new());
        let committer = Arc::new(Committer::new(
            Arc::clone(&state),
            Arc::clone(&statuses),
            vec![identity.clone()],
        ));

        let (queue, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let orderer = tokio::spawn(run_orderer(
            receiver,
            Arc::clone(&committer),
            config.batch_size,
            config.batch_timeout(),
        ));

        info!(
            channel = %config.channel_id,
            chaincode = %config.chaincode_id,
            peer = %identity,
            "ledger peer started"
        );

        Self {
            config,
            identity,
            signing_key,
            state,
            statuses,
            committer,
            queue: Mutex::new(Some(queue)),
            orderer: Mutex::new(Some(orderer)),
        }
    }

    pub fn config(&self) -> &PeerConfig {
        &self.config
    }

    /// Identity the peer endorses with.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Number of committed blocks.
    pub fn height(&self) -> u64 {
        self.committer.height()
    }

    pub fn block(&self, number: u64) -> Option<Block> {
        self.committer.block(number)
    }

    /// Committed value of `key`.
    pub fn committed_value(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().get(key).map(|v| v.value.clone())
    }

    /// Status of a transaction if it has been committed.
    pub fn status_of(&self, tx_id: &str) -> Option<CommitStatus> {
        self.statuses.get(tx_id)
    }

    /// Stop accepting transactions and wait for queued ones to commit.
    pub async fn shutdown(&self) {
        drop(self.queue.lock().take());
        let orderer = self.orderer.lock().take();
        if let Some(orderer) = orderer {
            let _ = orderer.await;
            info!(height = self.height(), "ledger peer stopped");
        }
    }

    fn check_target(&self, proposal: &Proposal) -> Result<(), PeerError> {
        if proposal.channel_id != self.config.channel_id {
            return Err(PeerError::ChannelNotFound(proposal.channel_id.clone()));
        }
        if proposal.chaincode_id != self.config.chaincode_id {
            return Err(PeerError::ChaincodeNotFound(proposal.chaincode_id.clone()));
        }
        Ok(())
    }

    fn check_proposal(&self, signed: &SignedProposal) -> Result<(), PeerError> {
        if !signed.proposal.has_consistent_tx_id() {
            return Err(PeerError::InvalidProposal(
                "transaction id does not match nonce and creator".into(),
            ));
        }
        verify_signed_proposal(signed).map_err(|e| PeerError::InvalidProposal(e.to_string()))?;
        self.check_target(&signed.proposal)
    }

    async fn simulate(&self, proposal: &Proposal) -> (ChaincodeResponse, ReadWriteSet) {
        let simulator = TxSimulator::new(Arc::clone(&self.state));
        let response = {
            let contract = GarmentContract::new(&simulator);
            invoke(&contract, &proposal.function, &proposal.args).await
        };
        (response, simulator.into_read_write_set())
    }
}

fn contract_failure(response: ChaincodeResponse) -> PeerError {
    PeerError::Chaincode {
        status: response.status,
        message: response.message,
    }
}

#[async_trait]
impl LedgerPeerApi for LedgerPeer {
    #[instrument(skip(self, proposal), fields(tx_id = %proposal.proposal.tx_id, function = %proposal.proposal.function))]
    async fn evaluate(&self, proposal: &SignedProposal) -> Result<Vec<u8>, PeerError> {
        self.check_proposal(proposal)?;
        let (response, _) = self.simulate(&proposal.proposal).await;
        if !response.is_success() {
            return Err(contract_failure(response));
        }
        debug!(payload_len = response.payload.len(), "proposal evaluated");
        Ok(response.payload)
    }

    #[instrument(skip(self, proposal), fields(tx_id = %proposal.proposal.tx_id, function = %proposal.proposal.function))]
    async fn endorse(&self, proposal: &SignedProposal) -> Result<ProposalResponse, PeerError> {
        self.check_proposal(proposal)?;
        let (response, results) = self.simulate(&proposal.proposal).await;
        if !response.is_success() {
            return Err(contract_failure(response));
        }

        let tx_id = proposal.proposal.tx_id.clone();
        let bytes = ProposalResponse::endorsed_bytes(&tx_id, &response, &results)?;
        let endorsement = Endorsement {
            endorser: self.identity.clone(),
            signature: self.signing_key.sign(&bytes).to_bytes(),
        };
        debug!(
            reads = results.reads.len(),
            writes = results.writes.len(),
            "proposal endorsed"
        );
        Ok(ProposalResponse {
            tx_id,
            response,
            results,
            endorsement,
        })
    }

    #[instrument(skip(self, envelope), fields(tx_id = %envelope.transaction.tx_id()))]
    async fn submit(&self, envelope: TransactionEnvelope) -> Result<(), PeerError> {
        if !envelope.transaction.proposal.has_consistent_tx_id() {
            return Err(PeerError::InvalidEnvelope(
                "transaction id does not match nonce and creator".into(),
            ));
        }
        verify_envelope(&envelope).map_err(|e| PeerError::InvalidEnvelope(e.to_string()))?;
        self.check_target(&envelope.transaction.proposal)?;

        let queue = self
            .queue
            .lock()
            .clone()
            .ok_or(PeerError::OrdererUnavailable)?;
        queue
            .send(envelope)
            .await
            .map_err(|_| PeerError::OrdererUnavailable)?;
        debug!("transaction queued for ordering");
        Ok(())
    }

    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, PeerError> {
        Ok(self.statuses.wait(tx_id).await)
    }
}
