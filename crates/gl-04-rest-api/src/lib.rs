//! # REST API
//!
//! HTTP front end for the garment ledger.
//!
//! | Method | Path | Ledger call |
//! |--------|------|-------------|
//! | POST | `/api/garments` | submit `CreateGarment` |
//! | GET | `/api/garments` | evaluate `GetAllGarments` |
//! | GET | `/health` | none |
//! | GET | `/metrics` | none |
//!
//! Ledger failures are logged; clients only see a fixed message and a 500.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod ports;
pub mod router;
pub mod server;

pub use config::ApiConfig;
pub use errors::{ApiError, LedgerError};
pub use handlers::CreateGarmentRequest;
pub use ports::GarmentLedger;
pub use router::{build_router, AppState};
pub use server::serve;
