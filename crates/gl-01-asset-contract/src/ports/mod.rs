//! # Ports (Hexagonal Architecture)
//!
//! - `inbound`: the operations the contract exposes to the ledger
//! - `outbound`: the state store the contract executes against

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
