//! Form field value objects

use super::schema::ValueShape;
use serde::{Deserialize, Serialize};

/// Type-safe field values.
///
/// Serializes untagged, so a value store renders as plain JSON:
/// strings, string arrays and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Choices(Vec<String>),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// The empty default for a shape: empty string, empty list or `false`
    pub fn empty(shape: ValueShape) -> Self {
        match shape {
            ValueShape::Text => FieldValue::Text(String::new()),
            ValueShape::Choices => FieldValue::Choices(Vec::new()),
            ValueShape::Flag => FieldValue::Flag(false),
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            FieldValue::Text(_) => ValueShape::Text,
            FieldValue::Choices(_) => ValueShape::Choices,
            FieldValue::Flag(_) => ValueShape::Flag,
        }
    }

    /// Whether this value equals the empty default of its shape
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Choices(v) => v.is_empty(),
            FieldValue::Flag(b) => !*b,
        }
    }

    /// Get the text value (returns empty string for other shapes)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the selected choices (returns empty slice for other shapes)
    pub fn as_choices(&self) -> &[String] {
        match self {
            FieldValue::Choices(v) => v,
            _ => &[],
        }
    }

    /// Get the flag value (returns false for other shapes)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            _ => false,
        }
    }
}

/// Free-text input used outside the schema engine (registration screen)
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }
}
