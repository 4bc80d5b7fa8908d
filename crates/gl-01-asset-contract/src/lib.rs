//! # Garment Asset Contract
//!
//! Ledger-side business logic for the garment ownership ledger.
//!
//! ## Components
//!
//! - **Canonical Encoder** (`domain::canonical`): deterministic bytes for
//!   every value written to state
//! - **State Store** (`ports::outbound`): transactional key-value port, with
//!   an in-memory adapter
//! - **Garment Contract** (`service`): create / read / update / delete /
//!   exists / transfer / list / seed
//! - **Dispatcher** (`dispatch`): wire function names to contract calls
//!
//! ## Determinism
//!
//! Every endorsing peer executes the same invocation independently. All
//! writes are canonicalised and the contract reads nothing but its
//! arguments and the state store, so identical inputs yield identical
//! read/write sets on every peer.

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::InMemoryStateStore;
pub use dispatch::{functions, invoke};
pub use domain::*;
pub use errors::*;
pub use ports::*;
pub use service::GarmentContract;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::adapters::InMemoryStateStore;
    pub use crate::dispatch::{functions, invoke};
    pub use crate::domain::{canonicalize, seed_garments, Garment};
    pub use crate::errors::{ContractError, StoreError};
    pub use crate::ports::{GarmentTransferApi, KeyValue, StateIterator, StateStore};
    pub use crate::service::GarmentContract;
}
