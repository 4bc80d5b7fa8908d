//! # Adapters
//!
//! - `simulator`: the contract's state store during endorsement

pub mod simulator;

pub use simulator::*;
