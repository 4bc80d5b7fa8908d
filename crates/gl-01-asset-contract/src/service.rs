//! # Garment Contract Service
//!
//! The garment lifecycle state machine over a [`StateStore`].
//!
//! ## Record lifecycle
//!
//! ```text
//!   absent ──CreateGarment──→ present ──DeleteGarment──→ absent
//!                              │   ↑
//!                              └───┘ UpdateGarment / TransferGarment
//! ```
//!
//! `InitLedger` writes the seed records regardless of prior state. A key
//! holding an empty value counts as absent.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::{canonicalize, encode_value, seed_garments, sort_keys_recursive, Garment};
use crate::errors::{ContractError, DecodeError};
use crate::ports::{GarmentTransferApi, StateStore};

const OWNER_FIELD: &str = "Owner";

/// Garment contract bound to one transaction's state store.
pub struct GarmentContract<S: StateStore> {
    store: S,
}

impl<S: StateStore> GarmentContract<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The state store this contract writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    async fn put_garment(&self, garment: &Garment) -> Result<Vec<u8>, ContractError> {
        let bytes = canonicalize(garment)?;
        self.store.put_state(&garment.id, bytes.clone()).await?;
        Ok(bytes)
    }

    async fn require_present(&self, id: &str) -> Result<(), ContractError> {
        if self.garment_exists(id).await? {
            Ok(())
        } else {
            Err(ContractError::NotFound { id: id.to_string() })
        }
    }
}

#[async_trait]
impl<S: StateStore> GarmentTransferApi for GarmentContract<S> {
    #[instrument(skip(self))]
    async fn init_ledger(&self) -> Result<(), ContractError> {
        let seeds = seed_garments();
        for garment in &seeds {
            self.put_garment(garment).await?;
            debug!(garment_id = %garment.id, "seeded garment");
        }
        info!(count = seeds.len(), "ledger initialised");
        Ok(())
    }

    #[instrument(skip(self, color, size, owner, appraised_value), fields(garment_id = %id))]
    async fn create_garment(
        &self,
        id: &str,
        color: &str,
        size: &str,
        owner: &str,
        appraised_value: &str,
    ) -> Result<String, ContractError> {
        if self.garment_exists(id).await? {
            return Err(ContractError::AlreadyExists { id: id.to_string() });
        }
        let garment = Garment::new(id, color, size, owner, appraised_value);
        let bytes = self.put_garment(&garment).await?;
        info!("garment created");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    #[instrument(skip(self), fields(garment_id = %id))]
    async fn read_garment(&self, id: &str) -> Result<String, ContractError> {
        match self.store.get_state(id).await? {
            Some(bytes) if !bytes.is_empty() => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            _ => Err(ContractError::NotFound { id: id.to_string() }),
        }
    }

    #[instrument(skip(self, color, size, owner, appraised_value), fields(garment_id = %id))]
    async fn update_garment(
        &self,
        id: &str,
        color: &str,
        size: &str,
        owner: &str,
        appraised_value: &str,
    ) -> Result<(), ContractError> {
        self.require_present(id).await?;
        self.put_garment(&Garment::new(id, color, size, owner, appraised_value))
            .await?;
        info!("garment updated");
        Ok(())
    }

    #[instrument(skip(self), fields(garment_id = %id))]
    async fn delete_garment(&self, id: &str) -> Result<(), ContractError> {
        self.require_present(id).await?;
        self.store.delete_state(id).await?;
        info!("garment deleted");
        Ok(())
    }

    async fn garment_exists(&self, id: &str) -> Result<bool, ContractError> {
        Ok(self
            .store
            .get_state(id)
            .await?
            .is_some_and(|bytes| !bytes.is_empty()))
    }

    #[instrument(skip(self), fields(garment_id = %id))]
    async fn transfer_garment(&self, id: &str, new_owner: &str) -> Result<String, ContractError> {
        let stored = self.read_garment(id).await?;
        let mut record: Value =
            serde_json::from_str(&stored).map_err(|e| ContractError::Corrupt {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        let Some(fields) = record.as_object_mut() else {
            return Err(ContractError::Corrupt {
                id: id.to_string(),
                reason: "stored value is not a JSON object".to_string(),
            });
        };

        let prior_owner = match fields.insert(OWNER_FIELD.to_string(), Value::from(new_owner)) {
            Some(Value::String(owner)) => owner,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let bytes = encode_value(&sort_keys_recursive(record))?;
        self.store.put_state(id, bytes).await?;
        info!(%prior_owner, %new_owner, "garment transferred");
        Ok(prior_owner)
    }

    #[instrument(skip(self))]
    async fn get_all_garments(&self) -> Result<String, ContractError> {
        let mut records = Vec::new();
        for entry in self.store.get_state_by_range("", "").await? {
            let text = String::from_utf8_lossy(&entry.value).into_owned();
            let record = match serde_json::from_str::<Value>(&text) {
                Ok(value) => sort_keys_recursive(value),
                Err(e) => {
                    let err = DecodeError {
                        key: entry.key,
                        reason: e.to_string(),
                    };
                    warn!(error = %err, "returning undecodable value as text");
                    Value::String(text)
                }
            };
            records.push(record);
        }
        debug!(count = records.len(), "listed garments");
        let bytes = encode_value(&Value::Array(records))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStateStore;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn contract() -> GarmentContract<Arc<InMemoryStateStore>> {
        GarmentContract::new(Arc::new(InMemoryStateStore::new()))
    }

    proptest! {
        #[test]
        fn test_create_then_read_returns_canonical_record(
            id in ".*",
            color in ".*",
            size in ".*",
            owner in ".*",
            appraised_value in ".*",
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let (created, read, exists) = runtime.block_on(async {
                let contract = contract();
                let created = contract
                    .create_garment(&id, &color, &size, &owner, &appraised_value)
                    .await
                    .unwrap();
                let read = contract.read_garment(&id).await.unwrap();
                let exists = contract.garment_exists(&id).await.unwrap();
                (created, read, exists)
            });

            let expected = canonicalize(&Garment::new(
                id.as_str(),
                color.as_str(),
                size.as_str(),
                owner.as_str(),
                appraised_value.as_str(),
            ))
            .unwrap();
            prop_assert_eq!(read.as_bytes(), expected.as_slice());
            prop_assert_eq!(created, read);
            prop_assert!(exists);
        }
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let contract = contract();
        let created = contract
            .create_garment("g100", "blue", "M", "alice", "250")
            .await
            .unwrap();
        assert_eq!(
            created,
            r#"{"AppraisedValue":"250","Color":"blue","ID":"g100","Owner":"alice","Size":"M"}"#
        );
        assert_eq!(contract.read_garment("g100").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_duplicate_rejected() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        let err = contract
            .create_garment("garment1", "red", "S", "bob", "10")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The garment garment1 already exists");
        assert!(contract.read_garment("garment1").await.unwrap().contains(r#""Owner":"A""#));
    }

    #[tokio::test]
    async fn test_init_ledger_seeds_six_records() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        assert_eq!(contract.store().len(), 6);
        assert_eq!(
            contract.read_garment("garment4").await.unwrap(),
            r#"{"AppraisedValue":600,"Color":"yellow","DocType":"garment","ID":"garment4","Owner":"C","Size":10}"#
        );
    }

    #[tokio::test]
    async fn test_init_ledger_overwrites() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        contract
            .update_garment("garment1", "pink", "XL", "Z", "1")
            .await
            .unwrap();
        contract.init_ledger().await.unwrap();
        assert!(contract
            .read_garment("garment1")
            .await
            .unwrap()
            .contains(r#""Color":"blue""#));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        contract
            .update_garment("garment1", "navy", "6", "A", "320")
            .await
            .unwrap();
        assert_eq!(
            contract.read_garment("garment1").await.unwrap(),
            r#"{"AppraisedValue":"320","Color":"navy","ID":"garment1","Owner":"A","Size":"6"}"#
        );
    }

    #[tokio::test]
    async fn test_missing_record_operations_fail() {
        let contract = contract();
        let not_found = ContractError::NotFound { id: "nope".into() };
        assert_eq!(contract.read_garment("nope").await.unwrap_err(), not_found);
        assert_eq!(
            contract
                .update_garment("nope", "a", "b", "c", "d")
                .await
                .unwrap_err(),
            not_found
        );
        assert_eq!(contract.delete_garment("nope").await.unwrap_err(), not_found);
        assert_eq!(
            contract.transfer_garment("nope", "x").await.unwrap_err(),
            not_found
        );
        assert!(contract.store().is_empty());
    }

    #[tokio::test]
    async fn test_empty_value_counts_as_absent() {
        let contract = contract();
        contract.store().put_state("g0", Vec::new()).await.unwrap();
        assert!(!contract.garment_exists("g0").await.unwrap());
        assert!(contract.read_garment("g0").await.is_err());
        contract
            .create_garment("g0", "red", "S", "bob", "1")
            .await
            .unwrap();
        assert!(contract.garment_exists("g0").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_then_exists() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        contract.delete_garment("garment6").await.unwrap();
        assert!(!contract.garment_exists("garment6").await.unwrap());
        assert!(contract.delete_garment("garment6").await.is_err());
    }

    #[tokio::test]
    async fn test_transfer_returns_prior_owner() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        let prior = contract.transfer_garment("garment2", "Z").await.unwrap();
        assert_eq!(prior, "B");
        assert_eq!(
            contract.read_garment("garment2").await.unwrap(),
            r#"{"AppraisedValue":400,"Color":"red","DocType":"garment","ID":"garment2","Owner":"Z","Size":5}"#
        );
    }

    #[tokio::test]
    async fn test_transfer_keeps_unknown_fields() {
        let contract = contract();
        contract
            .store()
            .put_state("g9", br#"{"ID":"g9","Owner":"A","Extra":{"b":1,"a":2}}"#.to_vec())
            .await
            .unwrap();
        contract.transfer_garment("g9", "B").await.unwrap();
        assert_eq!(
            contract.read_garment("g9").await.unwrap(),
            r#"{"Extra":{"a":2,"b":1},"ID":"g9","Owner":"B"}"#
        );
    }

    #[tokio::test]
    async fn test_transfer_non_object_is_corrupt() {
        let contract = contract();
        contract.store().put_state("g9", b"[1,2]".to_vec()).await.unwrap();
        let err = contract.transfer_garment("g9", "B").await.unwrap_err();
        assert!(matches!(err, ContractError::Corrupt { .. }));
        assert_eq!(contract.read_garment("g9").await.unwrap(), "[1,2]");
    }

    #[tokio::test]
    async fn test_get_all_in_key_order() {
        let contract = contract();
        contract.init_ledger().await.unwrap();
        contract
            .create_garment("g7", "grey", "S", "E", "900")
            .await
            .unwrap();
        let all: Vec<Value> = serde_json::from_str(&contract.get_all_garments().await.unwrap()).unwrap();
        let ids: Vec<&str> = all.iter().map(|g| g["ID"].as_str().unwrap()).collect();
        assert_eq!(
            ids,
            vec!["g7", "garment1", "garment2", "garment3", "garment4", "garment5", "garment6"]
        );
    }

    #[tokio::test]
    async fn test_get_all_empty_ledger() {
        assert_eq!(contract().get_all_garments().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_get_all_keeps_undecodable_values_as_text() {
        let contract = contract();
        contract.store().put_state("a", b"not json".to_vec()).await.unwrap();
        contract.store().put_state("b", br#"{"ID":"b"}"#.to_vec()).await.unwrap();
        assert_eq!(
            contract.get_all_garments().await.unwrap(),
            r#"["not json",{"ID":"b"}]"#
        );
    }
}
