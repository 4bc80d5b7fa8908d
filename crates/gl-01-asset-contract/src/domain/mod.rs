//! # Domain Layer (Inner Hexagon)
//!
//! Pure logic: canonical encoding and the seed data set. No I/O.

pub mod canonical;
pub mod seeds;

pub use canonical::*;
pub use seeds::*;
pub use shared_types::{FieldValue, Garment, GARMENT_DOC_TYPE};
