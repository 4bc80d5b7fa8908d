//! # Garment Node
//!
//! Process wiring for a self-contained garment ledger:
//!
//! ```text
//! HTTP ──→ gl-04-rest-api ──→ GarmentClient ──→ Gateway
//!                                                  │ InProcessConnection
//!                                                  ↓
//!                                          LedgerPeer (simulate, endorse,
//!                                          order, commit) ──→ GarmentContract
//! ```

pub mod adapters;
pub mod config;
pub mod runtime;

pub use adapters::InProcessConnection;
pub use config::{NodeConfig, NodeConfigError};
pub use runtime::{GarmentNode, NodeError};
