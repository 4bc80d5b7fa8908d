//! # Domain Layer
//!
//! Configuration, protocol phases, signing identity and message building.

pub mod config;
pub mod identity;
pub mod phase;
pub mod proposal;

pub use config::*;
pub use identity::*;
pub use phase::*;
pub use proposal::*;
