//! Accumulated field values for one form session

use super::field::FieldValue;
use super::schema::FieldDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from field id to its current value.
///
/// Entries appear on first edit. Reads go through [`ValueStore::value_for`],
/// which resolves absent entries to the field's empty default, so a missing
/// key is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueStore {
    entries: BTreeMap<String, FieldValue>,
}

impl ValueStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`, or its empty default.
    ///
    /// A stored value whose shape does not match the field also reads as the
    /// empty default.
    pub fn value_for(&self, field: &FieldDef) -> FieldValue {
        let shape = field.kind().shape();
        match self.entries.get(&field.field_id) {
            Some(value) if value.shape() == shape => value.clone(),
            _ => FieldValue::empty(shape),
        }
    }

    /// Raw stored entry, without default resolution
    #[allow(dead_code)]
    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.entries.get(field_id)
    }

    /// Replace (or create) the whole entry for `field_id`
    pub fn set(&mut self, field_id: impl Into<String>, value: FieldValue) {
        self.entries.insert(field_id.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.entries.iter()
    }

    /// JSON object keyed by field id
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
