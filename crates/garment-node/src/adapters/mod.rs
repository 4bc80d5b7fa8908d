//! # Adapters
//!
//! - `in_process`: gateway connection to a peer running in this process

pub mod in_process;

pub use in_process::*;
