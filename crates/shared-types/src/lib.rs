//! # Shared Types Crate
//!
//! Wire-level entities shared by the client tier (`gl-03-gateway-client`) and
//! the ledger tier (`gl-02-ledger-peer`).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every message crossing the network boundary
//!   is defined here.
//! - **Signed Bytes Are Serialized Bytes**: signatures always cover the
//!   `signing_bytes()` of the message, never an ad-hoc re-encoding.
//! - **Identity Travels With The Proposal**: the creator identity inside a
//!   proposal is the only identity the ledger trusts.

pub mod entities;
pub mod errors;
pub mod garment;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use garment::*;
pub use security::*;
