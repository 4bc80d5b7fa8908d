//! # Gateway Client
//!
//! Client tier of the garment ledger. Builds and signs proposals, drives the
//! evaluate and endorse → submit → commit-status protocols against a
//! [`GatewayConnection`], and bounds every round trip with its own deadline.
//!
//! ## Usage
//!
//! ```ignore
//! let signer = Arc::new(Ed25519Signer::generate());
//! let gateway = Gateway::connect(config, connection, signer.identity("Org1MSP"), signer)?;
//! let garments = GarmentClient::new(gateway.default_contract());
//! garments.init_ledger().await?;
//! gateway.close().await;
//! ```
//!
//! ## Default deadlines
//!
//! | Phase | Deadline |
//! |-------|----------|
//! | evaluate | 5s |
//! | endorse | 15s |
//! | submit | 5s |
//! | commit status | 60s |

pub mod domain;
pub mod errors;
pub mod garment;
pub mod ports;
pub mod service;

pub use domain::*;
pub use errors::*;
pub use garment::{GarmentClient, GarmentInput};
pub use ports::GatewayConnection;
pub use service::{Contract, Gateway, Network};
