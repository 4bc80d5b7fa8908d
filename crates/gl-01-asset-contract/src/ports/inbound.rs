//! # Inbound Ports (Driving Ports)
//!
//! The garment operations, as invoked by the ledger once per transaction.

use async_trait::async_trait;

use crate::errors::ContractError;

/// Garment lifecycle operations.
///
/// Every call executes inside exactly one ledger transaction. An `Err`
/// aborts that transaction and none of its writes are kept.
#[async_trait]
pub trait GarmentTransferApi: Send + Sync {
    /// Write the six demonstration records, overwriting any existing values.
    async fn init_ledger(&self) -> Result<(), ContractError>;

    /// Create a new untagged record. Returns its canonical serialization.
    async fn create_garment(
        &self,
        id: &str,
        color: &str,
        size: &str,
        owner: &str,
        appraised_value: &str,
    ) -> Result<String, ContractError>;

    /// Stored text for `id`.
    async fn read_garment(&self, id: &str) -> Result<String, ContractError>;

    /// Replace the record for an existing `id`.
    async fn update_garment(
        &self,
        id: &str,
        color: &str,
        size: &str,
        owner: &str,
        appraised_value: &str,
    ) -> Result<(), ContractError>;

    /// Remove an existing record.
    async fn delete_garment(&self, id: &str) -> Result<(), ContractError>;

    /// Whether `id` holds a non-empty value.
    async fn garment_exists(&self, id: &str) -> Result<bool, ContractError>;

    /// Change the owner. Returns the prior owner.
    async fn transfer_garment(&self, id: &str, new_owner: &str) -> Result<String, ContractError>;

    /// Every record in key order, as a JSON array.
    async fn get_all_garments(&self) -> Result<String, ContractError>;
}
