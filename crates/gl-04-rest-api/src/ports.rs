//! # Ports
//!
//! What the HTTP handlers need from the ledger, and the adapter binding it
//! to the gateway client.

use async_trait::async_trait;
use gl_03_gateway_client::{GarmentClient, GarmentInput};

use crate::errors::LedgerError;

#[async_trait]
pub trait GarmentLedger: Send + Sync {
    /// Submit a new record and wait for it to commit.
    async fn create_garment(&self, garment: GarmentInput) -> Result<(), LedgerError>;

    /// All records as the contract's JSON array text.
    async fn list_garments(&self) -> Result<String, LedgerError>;
}

#[async_trait]
impl GarmentLedger for GarmentClient {
    async fn create_garment(&self, garment: GarmentInput) -> Result<(), LedgerError> {
        self.create(&garment)
            .await
            .map(|_| ())
            .map_err(|e| LedgerError(e.to_string()))
    }

    async fn list_garments(&self) -> Result<String, LedgerError> {
        self.list_raw().await.map_err(|e| LedgerError(e.to_string()))
    }
}
