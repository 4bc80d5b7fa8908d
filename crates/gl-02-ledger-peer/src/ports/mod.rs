//! # Ports
//!
//! - `inbound`: the peer operations a client connection drives

pub mod inbound;

pub use inbound::*;
