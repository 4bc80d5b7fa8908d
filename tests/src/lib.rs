//! # Garment-Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Node and gateway builders shared by the flows
//! └── integration/      # Client → peer → contract flows
//!     ├── flows.rs      # Garment lifecycle through the gateway
//!     ├── concurrency.rs# Conflicting transactions and MVCC
//!     ├── deadlines.rs  # Per-phase deadlines against a slow peer
//!     └── http.rs       # REST front end over a live node
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gl-tests
//! cargo bench -p gl-tests
//! ```

pub mod fixtures;
pub mod integration;
