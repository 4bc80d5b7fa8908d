//! # Node Runtime
//!
//! Startup order:
//!
//! 1. Start the ledger peer and its ordering task
//! 2. Build the client identity
//! 3. Connect the gateway through an in-process connection
//! 4. Optionally seed the ledger
//!
//! Shutdown closes the gateway first, then drains the peer.

use ed25519_dalek::SigningKey;
use gl_02_ledger_peer::LedgerPeer;
use gl_03_gateway_client::{Ed25519Signer, GarmentClient, Gateway, GatewayError};
use gl_04_rest_api::{build_router, GarmentLedger};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::adapters::InProcessConnection;
use crate::config::NodeConfig;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// A running garment node.
pub struct GarmentNode {
    config: NodeConfig,
    peer: Arc<LedgerPeer>,
    gateway: Gateway,
    garments: GarmentClient,
}

impl GarmentNode {
    /// Start the peer and connect the gateway. Must be called within a Tokio runtime.
    pub fn start(config: NodeConfig) -> Result<Self, NodeError> {
        let peer_key = SigningKey::generate(&mut rand::thread_rng());
        let peer = Arc::new(LedgerPeer::start(config.peer.clone(), peer_key));

        let signer = match &config.identity_seed {
            Some(seed) => Ed25519Signer::from_hex_seed(seed).map_err(GatewayError::from)?,
            None => Ed25519Signer::generate(),
        };
        let identity = signer.identity(config.gateway.msp_id.clone());
        info!(%identity, "client identity loaded");

        let connection = Arc::new(InProcessConnection::new(Arc::clone(&peer)));
        let gateway = Gateway::connect(
            config.gateway.clone(),
            connection,
            identity,
            Arc::new(signer),
        )?;
        let garments = GarmentClient::new(gateway.default_contract());

        Ok(Self {
            config,
            peer,
            gateway,
            garments,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn peer(&self) -> &Arc<LedgerPeer> {
        &self.peer
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn garments(&self) -> &GarmentClient {
        &self.garments
    }

    /// Seed the ledger if configured to.
    pub async fn bootstrap(&self) -> Result<(), NodeError> {
        if self.config.init_ledger {
            info!("submitting InitLedger");
            self.garments.init_ledger().await?;
            info!("ledger initialised");
        }
        Ok(())
    }

    /// HTTP router bound to this node's ledger.
    pub fn router(&self) -> axum::Router {
        let ledger: Arc<dyn GarmentLedger> = Arc::new(self.garments.clone());
        build_router(ledger)
    }

    pub async fn shutdown(&self) {
        self.gateway.close().await;
        self.peer.shutdown().await;
        info!("garment node stopped");
    }
}
