//! Peer configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference peer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Channel served by this peer.
    pub channel_id: String,
    /// Name under which the garment contract is deployed.
    pub chaincode_id: String,
    /// Membership service provider of the peer's endorsing identity.
    pub msp_id: String,
    /// Maximum transactions per block.
    pub batch_size: usize,
    /// Longest time a transaction waits for its block to fill, in milliseconds.
    pub batch_timeout_ms: u64,
    /// Capacity of the ordering queue.
    pub queue_capacity: usize,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            channel_id: "mychannel".to_string(),
            chaincode_id: "basic".to_string(),
            msp_id: "Org1MSP".to_string(),
            batch_size: 10,
            batch_timeout_ms: 200,
            queue_capacity: 1024,
        }
    }
}

impl PeerConfig {
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_millis(self.batch_timeout_ms)
    }
}
