//! # Ports
//!
//! - `outbound`: the connection to the ledger's gateway peer

pub mod outbound;

pub use outbound::*;
