//! # Adapters
//!
//! - `memory_store`: in-memory state store for tests and local use

pub mod memory_store;

pub use memory_store::*;
