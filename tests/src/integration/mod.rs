//! # Integration Tests
//!
//! End-to-end flows from the gateway client through endorsement, ordering
//! and commit, against a peer running in the same process.

pub mod concurrency;
pub mod deadlines;
pub mod flows;
pub mod http;
