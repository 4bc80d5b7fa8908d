//! # Canonical Encoder
//!
//! Every write goes through [`canonicalize`] so that independent executions of
//! the same transaction produce byte-identical values.
//!
//! ## Rules
//!
//! - Object keys sorted recursively, byte-wise
//! - Compact output, no insignificant whitespace
//! - UTF-8 text
//!
//! Sorting is done explicitly rather than relying on the map type behind
//! `serde_json::Value`, whose ordering depends on crate features.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::ContractError;

/// Serialize `value` into its canonical byte form.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ContractError> {
    let value =
        serde_json::to_value(value).map_err(|e| ContractError::Serialization(e.to_string()))?;
    encode_value(&sort_keys_recursive(value))
}

/// Canonical bytes of an already sorted JSON value.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(value).map_err(|e| ContractError::Serialization(e.to_string()))
}

/// Rebuild `value` with every object's keys in ascending byte order.
pub fn sort_keys_recursive(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, inner)| (key, sort_keys_recursive(inner)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys_recursive).collect()),
        scalar => scalar,
    }
}
