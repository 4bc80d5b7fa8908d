//! Shared builders for end-to-end tests.

use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use garment_node::{GarmentNode, InProcessConnection, NodeConfig};
use gl_02_ledger_peer::{LedgerPeer, PeerConfig};
use gl_03_gateway_client::{
    ConnectionError, Ed25519Signer, GarmentClient, Gateway, GatewayConfig, GatewayConnection,
    Phase,
};
use shared_types::{CommitStatus, ProposalResponse, SignedProposal, TransactionEnvelope};
use std::sync::Arc;
use std::time::Duration;

/// Node configuration with a short batch timeout so commits are quick.
pub fn fast_config() -> NodeConfig {
    let mut config = NodeConfig::default();
    config.peer.batch_timeout_ms = 10;
    config
}

/// Start a node with an empty ledger.
pub fn start_node() -> GarmentNode {
    GarmentNode::start(fast_config()).expect("node starts")
}

/// Start a node and seed it.
pub async fn seeded_node() -> GarmentNode {
    let node = start_node();
    node.garments().init_ledger().await.expect("InitLedger commits");
    node
}

/// Start a bare peer for tests that wire their own connection.
pub fn start_peer() -> Arc<LedgerPeer> {
    let config = PeerConfig {
        batch_timeout_ms: 10,
        ..PeerConfig::default()
    };
    Arc::new(LedgerPeer::start(
        config,
        SigningKey::generate(&mut rand::thread_rng()),
    ))
}

/// Connect a gateway to `connection` with a fresh identity.
pub fn gateway_over(connection: Arc<dyn GatewayConnection>) -> Gateway {
    let signer = Arc::new(Ed25519Signer::generate());
    let identity = signer.identity("Org1MSP");
    Gateway::connect(GatewayConfig::default(), connection, identity, signer).expect("gateway")
}

pub fn garment_client(gateway: &Gateway) -> GarmentClient {
    GarmentClient::new(gateway.default_contract())
}

/// Wraps a connection and delays one phase before forwarding it.
pub struct DelayedConnection {
    inner: InProcessConnection,
    phase: Phase,
    delay: Duration,
}

impl DelayedConnection {
    pub fn new(peer: Arc<LedgerPeer>, phase: Phase, delay: Duration) -> Self {
        Self {
            inner: InProcessConnection::new(peer),
            phase,
            delay,
        }
    }

    async fn pause(&self, phase: Phase) {
        if phase == self.phase {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl GatewayConnection for DelayedConnection {
    async fn evaluate(&self, proposal: &SignedProposal) -> Result<Vec<u8>, ConnectionError> {
        self.pause(Phase::Evaluate).await;
        self.inner.evaluate(proposal).await
    }

    async fn endorse(
        &self,
        proposal: &SignedProposal,
    ) -> Result<ProposalResponse, ConnectionError> {
        self.pause(Phase::Endorse).await;
        self.inner.endorse(proposal).await
    }

    async fn submit(&self, envelope: TransactionEnvelope) -> Result<(), ConnectionError> {
        self.pause(Phase::Submit).await;
        self.inner.submit(envelope).await
    }

    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, ConnectionError> {
        self.pause(Phase::CommitStatus).await;
        self.inner.commit_status(tx_id).await
    }

    async fn close(&self) {
        self.inner.close().await;
    }
}
