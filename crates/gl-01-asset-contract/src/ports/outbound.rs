//! # Outbound Ports (Driven Ports)
//!
//! The key-value view of the ledger's world state the contract runs against.
//! Implemented by the ledger peer's transaction simulator and by
//! [`InMemoryStateStore`](crate::adapters::InMemoryStateStore) for tests.

use async_trait::async_trait;
use std::ops::Bound;
use std::sync::Arc;

use crate::errors::StoreError;

/// One entry returned by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Owned, finite iterator over a range scan in ascending key order.
///
/// Consuming it to the end releases everything it holds.
#[derive(Debug, Default)]
pub struct StateIterator {
    entries: std::vec::IntoIter<KeyValue>,
}

impl StateIterator {
    pub fn new(entries: Vec<KeyValue>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl Iterator for StateIterator {
    type Item = KeyValue;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

/// Transactional key-value state.
///
/// Writes become visible to other transactions only once the surrounding
/// ledger commits the transaction.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current value for `key`; `None` when absent. An empty value is returned as-is.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set `key` to `value`.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Deleting an absent key is not an error.
    async fn delete_state(&self, key: &str) -> Result<(), StoreError>;

    /// Entries with `start <= key < end` in ascending order. An empty bound is open.
    async fn get_state_by_range(&self, start: &str, end: &str)
        -> Result<StateIterator, StoreError>;
}

/// Translate range-scan arguments into map bounds.
///
/// Returns `None` when the range is empty (`start >= end` with both bounded).
pub fn key_range(start: &str, end: &str) -> Option<(Bound<String>, Bound<String>)> {
    if !start.is_empty() && !end.is_empty() && start >= end {
        return None;
    }
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start.to_string())
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end.to_string())
    };
    Some((lower, upper))
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put_state(key, value).await
    }

    async fn delete_state(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete_state(key).await
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator, StoreError> {
        (**self).get_state_by_range(start, end).await
    }
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for &T {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put_state(key, value).await
    }

    async fn delete_state(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete_state(key).await
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator, StoreError> {
        (**self).get_state_by_range(start, end).await
    }
}
