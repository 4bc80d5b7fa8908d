//! Typed client for the garment contract.

use serde_json::Value;
use shared_types::Garment;

use crate::errors::GatewayError;
use crate::service::Contract;

/// Input for creating or updating a record. All fields are sent as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarmentInput {
    pub id: String,
    pub color: String,
    pub size: String,
    pub owner: String,
    pub appraised_value: String,
}

impl GarmentInput {
    fn args(&self) -> [&str; 5] {
        [
            &self.id,
            &self.color,
            &self.size,
            &self.owner,
            &self.appraised_value,
        ]
    }
}

/// Garment operations over a [`Contract`].
///
/// Reads are evaluated, everything else is submitted and waits for commit.
#[derive(Clone)]
pub struct GarmentClient {
    contract: Contract,
}

impl GarmentClient {
    pub fn new(contract: Contract) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Seed the ledger with the demonstration records.
    pub async fn init_ledger(&self) -> Result<(), GatewayError> {
        self.contract.submit_transaction("InitLedger", &[]).await?;
        Ok(())
    }

    /// Create a record. Returns the stored JSON text.
    pub async fn create(&self, garment: &GarmentInput) -> Result<String, GatewayError> {
        let payload = self
            .contract
            .submit_transaction("CreateGarment", &garment.args())
            .await?;
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }

    /// Every stored record as raw JSON text, exactly as returned by the contract.
    pub async fn list_raw(&self) -> Result<String, GatewayError> {
        let payload = self
            .contract
            .evaluate_transaction("GetAllGarments", &[])
            .await?;
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }

    /// Every stored record as JSON values.
    pub async fn list(&self) -> Result<Vec<Value>, GatewayError> {
        let raw = self.list_raw().await?;
        serde_json::from_str(&raw).map_err(|e| GatewayError::Evaluate {
            message: format!("unexpected GetAllGarments payload: {}", e),
        })
    }

    /// Read one record.
    pub async fn read(&self, id: &str) -> Result<Garment, GatewayError> {
        let payload = self
            .contract
            .evaluate_transaction("ReadGarment", &[id])
            .await?;
        serde_json::from_slice(&payload).map_err(|e| GatewayError::Evaluate {
            message: format!("garment {} is not a valid record: {}", id, e),
        })
    }

    pub async fn update(&self, garment: &GarmentInput) -> Result<(), GatewayError> {
        self.contract
            .submit_transaction("UpdateGarment", &garment.args())
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.contract
            .submit_transaction("DeleteGarment", &[id])
            .await?;
        Ok(())
    }

    pub async fn exists(&self, id: &str) -> Result<bool, GatewayError> {
        let payload = self
            .contract
            .evaluate_transaction("GarmentExists", &[id])
            .await?;
        Ok(payload == b"true")
    }

    /// Transfer ownership. Returns the prior owner.
    ///
    /// Not idempotent. After a `DeadlineExceeded` in the submit or
    /// commit-status phase the transfer may still have committed; call
    /// [`read`](Self::read) and check `owner` before transferring again,
    /// otherwise the record can be transferred twice and the second call
    /// reports the new owner as the prior one.
    pub async fn transfer(&self, id: &str, new_owner: &str) -> Result<String, GatewayError> {
        let payload = self
            .contract
            .submit_transaction("TransferGarment", &[id, new_owner])
            .await?;
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }
}
