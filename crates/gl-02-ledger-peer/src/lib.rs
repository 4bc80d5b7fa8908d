//! # Ledger Peer
//!
//! An in-process reference implementation of the ledger the garment
//! contract runs on.
//!
//! ## Transaction flow
//!
//! ```text
//! evaluate:  proposal ──verify──→ simulate ──→ payload
//!
//! endorse:   proposal ──verify──→ simulate ──→ read/write set + endorsement
//! submit:    envelope ──verify──→ ordering queue ──→ block ──→ validate ──→ commit
//! status:    wait for the transaction's validation code
//! ```
//!
//! ## Validation
//!
//! Transactions in a block are validated in order. A transaction whose read
//! set no longer matches committed versions is invalidated with
//! `MVCC_READ_CONFLICT` and none of its writes are applied.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ordering;
pub mod ports;
pub mod service;

pub use adapters::TxSimulator;
pub use domain::*;
pub use errors::PeerError;
pub use ordering::{Committer, StatusBoard};
pub use ports::LedgerPeerApi;
pub use service::LedgerPeer;
