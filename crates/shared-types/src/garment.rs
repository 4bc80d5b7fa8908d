//! # Garment Record
//!
//! The sole ledger entity. Field names are the persisted JSON keys; the
//! canonical byte layout (keys sorted, compact) is produced by the contract's
//! encoder, not by this type's `Serialize` order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator stored on seeded records.
pub const GARMENT_DOC_TYPE: &str = "garment";

/// A free-form field value: either JSON text or a JSON number.
///
/// Seeded records carry numbers (`"Size": 5`), client-created records carry
/// whatever string the client sent (`"Size": "M"`). Values are preserved as
/// given; there is no coercion between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// A garment record as persisted on the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Size")]
    pub size: FieldValue,
    #[serde(rename = "Owner")]
    pub owner: String,
    #[serde(rename = "AppraisedValue")]
    pub appraised_value: FieldValue,
    #[serde(rename = "DocType", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

impl Garment {
    /// Build an untagged record (no `DocType`), as client-created records are.
    pub fn new(
        id: impl Into<String>,
        color: impl Into<String>,
        size: impl Into<FieldValue>,
        owner: impl Into<String>,
        appraised_value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            size: size.into(),
            owner: owner.into(),
            appraised_value: appraised_value.into(),
            doc_type: None,
        }
    }

    /// Tag the record with the `garment` discriminator.
    #[must_use]
    pub fn tagged(mut self) -> Self {
        self.doc_type = Some(GARMENT_DOC_TYPE.to_string());
        self
    }
}
