//! # Transaction Simulator
//!
//! Executes one proposal against committed state without changing it. Every
//! key read is recorded with the version observed; writes and deletes are
//! buffered. The resulting [`ReadWriteSet`] is what peers endorse and what
//! the committer validates.
//!
//! Point reads observe the transaction's own buffered writes. Range scans
//! observe committed state only; each key returned is recorded in the read
//! set, but keys inserted into the range later are not detected.

use async_trait::async_trait;
use gl_01_asset_contract::{key_range, KeyValue, StateIterator, StateStore, StoreError};
use parking_lot::{Mutex, RwLock};
use shared_types::{KvRead, KvWrite, ReadWriteSet, Version};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::WorldState;

#[derive(Debug, Default)]
struct Recorded {
    reads: BTreeMap<String, Option<Version>>,
    writes: BTreeMap<String, KvWrite>,
}

/// Per-transaction state store recording a read/write set.
pub struct TxSimulator {
    state: Arc<RwLock<WorldState>>,
    recorded: Mutex<Recorded>,
}

impl TxSimulator {
    pub fn new(state: Arc<RwLock<WorldState>>) -> Self {
        Self {
            state,
            recorded: Mutex::new(Recorded::default()),
        }
    }

    /// Finish simulation. Reads and writes are ordered by key.
    pub fn into_read_write_set(self) -> ReadWriteSet {
        let recorded = self.recorded.into_inner();
        ReadWriteSet {
            reads: recorded
                .reads
                .into_iter()
                .map(|(key, version)| KvRead { key, version })
                .collect(),
            writes: recorded.writes.into_values().collect(),
        }
    }
}

#[async_trait]
impl StateStore for TxSimulator {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut recorded = self.recorded.lock();
        if let Some(write) = recorded.writes.get(key) {
            return Ok((!write.is_delete).then(|| write.value.clone()));
        }

        let state = self.state.read();
        let committed = state.get(key);
        recorded
            .reads
            .entry(key.to_string())
            .or_insert_with(|| committed.map(|v| v.version));
        Ok(committed.map(|v| v.value.clone()))
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.recorded.lock().writes.insert(
            key.to_string(),
            KvWrite {
                key: key.to_string(),
                value,
                is_delete: false,
            },
        );
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<(), StoreError> {
        self.recorded.lock().writes.insert(
            key.to_string(),
            KvWrite {
                key: key.to_string(),
                value: Vec::new(),
                is_delete: true,
            },
        );
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator, StoreError> {
        let Some(bounds) = key_range(start, end) else {
            return Ok(StateIterator::default());
        };

        let mut recorded = self.recorded.lock();
        let state = self.state.read();
        let mut entries = Vec::new();
        for (key, committed) in state.range(bounds) {
            recorded
                .reads
                .entry(key.clone())
                .or_insert(Some(committed.version));
            entries.push(KeyValue {
                key: key.clone(),
                value: committed.value.clone(),
            });
        }
        Ok(StateIterator::new(entries))
    }
}
