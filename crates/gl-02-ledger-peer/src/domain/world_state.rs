//! # World State
//!
//! Committed key → (value, version) map. Only the committer mutates it.

use shared_types::{KvWrite, Version};
use std::collections::BTreeMap;
use std::ops::Bound;

/// A committed value and the version of the transaction that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: Version,
}

/// Committed state of the channel.
#[derive(Debug, Default)]
pub struct WorldState {
    entries: BTreeMap<String, VersionedValue>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&VersionedValue> {
        self.entries.get(key)
    }

    /// Version of `key`, `None` when absent.
    pub fn version_of(&self, key: &str) -> Option<Version> {
        self.entries.get(key).map(|v| v.version)
    }

    /// Entries within `bounds` in ascending key order.
    pub fn range(
        &self,
        bounds: (Bound<String>, Bound<String>),
    ) -> impl Iterator<Item = (&String, &VersionedValue)> {
        self.entries.range::<String, _>(bounds)
    }

    /// Apply a transaction's writes at `version`.
    pub fn apply(&mut self, writes: &[KvWrite], version: Version) {
        for write in writes {
            if write.is_delete {
                self.entries.remove(&write.key);
            } else {
                self.entries.insert(
                    write.key.clone(),
                    VersionedValue {
                        value: write.value.clone(),
                        version,
                    },
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
