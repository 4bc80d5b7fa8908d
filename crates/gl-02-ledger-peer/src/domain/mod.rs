//! # Domain Layer
//!
//! Versioned world state, blocks, and commit-time validation rules.

pub mod block;
pub mod config;
pub mod validation;
pub mod world_state;

pub use block::*;
pub use config::*;
pub use validation::*;
pub use world_state::*;
