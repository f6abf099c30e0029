//! Form schema model as delivered by the form service
//!
//! The wire format nests the form under a `form` key:
//! `{ "form": { "formId", "formTitle", "version", "sections": [...] } }`.
//! Documents are checked against the structural invariants before a
//! [`FormSchema`] is handed out, so the rest of the engine never sees a
//! partial or inconsistent schema.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Declared field type, as spelled in the schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Date,
    Textarea,
    Dropdown,
    Radio,
    Checkbox,
}

/// A selectable option of a dropdown, radio group or checkbox group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

/// Schema-declared validation overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Definition of a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_test_id: Option<String>,
}

/// Resolved field kind.
///
/// This is the closed set every validation and render function matches on.
/// A checkbox resolves to [`FieldKind::CheckboxMulti`] when it declares
/// options and to [`FieldKind::CheckboxSingle`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    TextArea,
    Dropdown,
    Radio,
    CheckboxSingle,
    CheckboxMulti,
}

/// Shape of the value a field produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    Text,
    Choices,
    Flag,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "string",
            Self::Choices => "string list",
            Self::Flag => "boolean",
        };
        f.write_str(name)
    }
}

impl FieldKind {
    /// Resolve the kind of a field from its declared type and options
    pub fn of(field: &FieldDef) -> Self {
        match field.field_type {
            FieldType::Text => Self::Text,
            FieldType::Email => Self::Email,
            FieldType::Tel => Self::Tel,
            FieldType::Date => Self::Date,
            FieldType::Textarea => Self::TextArea,
            FieldType::Dropdown => Self::Dropdown,
            FieldType::Radio => Self::Radio,
            FieldType::Checkbox if field.options.is_some() => Self::CheckboxMulti,
            FieldType::Checkbox => Self::CheckboxSingle,
        }
    }

    /// The value shape this kind reads and writes
    pub fn shape(self) -> ValueShape {
        match self {
            Self::Text | Self::Email | Self::Tel | Self::Date | Self::TextArea => ValueShape::Text,
            Self::Dropdown | Self::Radio => ValueShape::Text,
            Self::CheckboxMulti => ValueShape::Choices,
            Self::CheckboxSingle => ValueShape::Flag,
        }
    }

    /// Whether this kind is constrained by `minLength`/`maxLength`
    pub fn has_length_limits(self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Tel | Self::TextArea)
    }

    /// Whether this kind needs a non-empty option list to be usable
    pub fn needs_options(self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::CheckboxMulti)
    }
}

impl FieldDef {
    pub fn kind(&self) -> FieldKind {
        FieldKind::of(self)
    }

    /// Declared options, empty for fields without any
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Schema-declared override for the "required" message
    pub fn validation_message(&self) -> Option<&str> {
        self.validation.as_ref().and_then(|v| v.message.as_deref())
    }

    /// Label of the option carrying `value`, if any
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// A group of fields presented and validated together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FieldDef>,
}

/// A complete form document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_id: String,
    pub form_title: String,
    #[serde(default)]
    pub version: String,
    pub sections: Vec<Section>,
}

/// Envelope returned by the form service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub form: FormSchema,
}

/// Reasons a schema document is rejected
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema document has an unrecognized shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("form has no sections")]
    NoSections,
    #[error("section {index} (`{title}`) has no fields")]
    EmptySection { index: usize, title: String },
    #[error("field id `{0}` is declared more than once")]
    DuplicateField(String),
    #[error("field `{0}` needs a non-empty option list")]
    MissingOptions(String),
}

impl FormSchema {
    /// Parse and check a schema document wrapped in the `form` envelope
    pub fn from_document(document: serde_json::Value) -> Result<Self, SchemaError> {
        let response: FormResponse = serde_json::from_value(document)?;
        response.form.checked()
    }

    /// Verify the structural invariants, consuming and returning the schema
    pub fn checked(self) -> Result<Self, SchemaError> {
        if self.sections.is_empty() {
            return Err(SchemaError::NoSections);
        }

        let mut earlier = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            if section.fields.is_empty() {
                return Err(SchemaError::EmptySection {
                    index,
                    title: section.title.clone(),
                });
            }
            let mut in_section = HashSet::new();
            for field in &section.fields {
                let id = field.field_id.as_str();
                if !in_section.insert(id) {
                    return Err(SchemaError::DuplicateField(field.field_id.clone()));
                }
                // Repeats across sections share one stored value
                if earlier.contains(id) {
                    tracing::warn!(
                        form_id = %self.form_id,
                        field_id = id,
                        section = index,
                        "field id reused from an earlier section"
                    );
                }
                if field.kind().needs_options() && field.options().is_empty() {
                    return Err(SchemaError::MissingOptions(field.field_id.clone()));
                }
            }
            earlier.extend(in_section);
        }

        Ok(self)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn last_section_index(&self) -> usize {
        self.sections.len().saturating_sub(1)
    }

    /// Look a field up by id anywhere in the schema
    pub fn field(&self, field_id: &str) -> Option<&FieldDef> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.field_id == field_id)
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_document() -> serde_json::Value {
        json!({
            "form": {
                "formId": "student-2024",
                "formTitle": "Student Details",
                "version": "1.2",
                "sections": [
                    {
                        "title": "Personal",
                        "description": "About you",
                        "fields": [
                            {
                                "fieldId": "name",
                                "type": "text",
                                "label": "Full Name",
                                "placeholder": "Jane Doe",
                                "required": true,
                                "minLength": 2,
                                "maxLength": 40,
                                "dataTestId": "name-input",
                                "validation": { "message": "Name please" }
                            },
                            { "fieldId": "email", "type": "email", "label": "Email", "required": false }
                        ]
                    },
                    {
                        "title": "Preferences",
                        "description": "",
                        "fields": [
                            {
                                "fieldId": "topics",
                                "type": "checkbox",
                                "label": "Topics",
                                "required": true,
                                "options": [
                                    { "value": "rust", "label": "Rust" },
                                    { "value": "go", "label": "Go", "dataTestId": "go-opt" }
                                ]
                            },
                            { "fieldId": "agree", "type": "checkbox", "label": "I agree", "required": true }
                        ]
                    }
                ]
            }
        })
    }

    mod parsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_document_reads_envelope() {
            let schema = FormSchema::from_document(sample_document()).unwrap();
            assert_eq!(schema.form_id, "student-2024");
            assert_eq!(schema.form_title, "Student Details");
            assert_eq!(schema.version, "1.2");
            assert_eq!(schema.section_count(), 2);
            assert_eq!(schema.section_titles(), vec!["Personal", "Preferences"]);
        }

        #[test]
        fn test_field_attributes_are_camel_case() {
            let schema = FormSchema::from_document(sample_document()).unwrap();
            let name = schema.field("name").unwrap();
            assert_eq!(name.field_type, FieldType::Text);
            assert_eq!(name.min_length, Some(2));
            assert_eq!(name.max_length, Some(40));
            assert_eq!(name.placeholder.as_deref(), Some("Jane Doe"));
            assert_eq!(name.data_test_id.as_deref(), Some("name-input"));
            assert_eq!(name.validation_message(), Some("Name please"));
        }

        #[test]
        fn test_missing_envelope_is_shape_error() {
            let doc = json!({ "formId": "x", "sections": [] });
            let err = FormSchema::from_document(doc).unwrap_err();
            assert!(matches!(err, SchemaError::Shape(_)));
        }

        #[test]
        fn test_null_document_is_shape_error() {
            let err = FormSchema::from_document(serde_json::Value::Null).unwrap_err();
            assert!(matches!(err, SchemaError::Shape(_)));
        }

        #[test]
        fn test_unknown_field_type_is_shape_error() {
            let doc = json!({
                "form": {
                    "formId": "f", "formTitle": "t", "version": "1",
                    "sections": [{ "title": "s", "fields": [
                        { "fieldId": "a", "type": "slider", "label": "A" }
                    ]}]
                }
            });
            assert!(matches!(
                FormSchema::from_document(doc),
                Err(SchemaError::Shape(_))
            ));
        }

        #[test]
        fn test_required_defaults_to_false() {
            let doc = json!({
                "form": {
                    "formId": "f", "formTitle": "t", "version": "1",
                    "sections": [{ "title": "s", "fields": [
                        { "fieldId": "a", "type": "text", "label": "A" }
                    ]}]
                }
            });
            let schema = FormSchema::from_document(doc).unwrap();
            assert!(!schema.field("a").unwrap().required);
        }
    }

    mod invariants {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_no_sections_rejected() {
            let err = schema(vec![]).checked().unwrap_err();
            assert!(matches!(err, SchemaError::NoSections));
        }

        #[test]
        fn test_empty_section_rejected() {
            let err = schema(vec![
                section("one", vec![field("a", FieldType::Text)]),
                section("two", vec![]),
            ])
            .checked()
            .unwrap_err();
            assert!(matches!(err, SchemaError::EmptySection { index: 1, .. }));
        }

        #[test]
        fn test_duplicate_field_within_section_rejected() {
            let err = schema(vec![section(
                "one",
                vec![field("a", FieldType::Text), field("a", FieldType::Email)],
            )])
            .checked()
            .unwrap_err();
            assert!(matches!(err, SchemaError::DuplicateField(id) if id == "a"));
        }

        #[test]
        fn test_field_id_repeated_across_sections_accepted() {
            let doc = json!({
                "form": {
                    "formId": "f", "formTitle": "t", "version": "1",
                    "sections": [
                        { "title": "A", "fields": [
                            { "fieldId": "email", "type": "email", "label": "Email" }
                        ]},
                        { "title": "B", "fields": [
                            { "fieldId": "email", "type": "email", "label": "Confirm email" }
                        ]}
                    ]
                }
            });
            let schema = FormSchema::from_document(doc).unwrap();
            assert_eq!(schema.section_count(), 2);
            assert_eq!(schema.field("email").map(|f| f.label.as_str()), Some("Email"));
        }

        #[test]
        fn test_dropdown_without_options_rejected() {
            let err = schema(vec![section("one", vec![field("pick", FieldType::Dropdown)])])
                .checked()
                .unwrap_err();
            assert!(matches!(err, SchemaError::MissingOptions(id) if id == "pick"));
        }

        #[test]
        fn test_radio_with_empty_options_rejected() {
            let err = schema(vec![section(
                "one",
                vec![with_options(field("r", FieldType::Radio), &[])],
            )])
            .checked()
            .unwrap_err();
            assert!(matches!(err, SchemaError::MissingOptions(_)));
        }

        #[test]
        fn test_single_checkbox_needs_no_options() {
            let checked = schema(vec![section("one", vec![field("agree", FieldType::Checkbox)])])
                .checked();
            assert!(checked.is_ok());
        }

        #[test]
        fn test_error_messages_are_readable() {
            assert_eq!(SchemaError::NoSections.to_string(), "form has no sections");
            assert_eq!(
                SchemaError::DuplicateField("x".to_string()).to_string(),
                "field id `x` is declared more than once"
            );
        }
    }

    mod kinds {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_checkbox_kind_depends_on_options() {
            let single = field("agree", FieldType::Checkbox);
            let multi = with_options(field("topics", FieldType::Checkbox), &["a", "b"]);
            assert_eq!(single.kind(), FieldKind::CheckboxSingle);
            assert_eq!(multi.kind(), FieldKind::CheckboxMulti);
        }

        #[test]
        fn test_shapes() {
            assert_eq!(FieldKind::Text.shape(), ValueShape::Text);
            assert_eq!(FieldKind::Date.shape(), ValueShape::Text);
            assert_eq!(FieldKind::Dropdown.shape(), ValueShape::Text);
            assert_eq!(FieldKind::Radio.shape(), ValueShape::Text);
            assert_eq!(FieldKind::CheckboxMulti.shape(), ValueShape::Choices);
            assert_eq!(FieldKind::CheckboxSingle.shape(), ValueShape::Flag);
        }

        #[test]
        fn test_length_limits_only_on_string_inputs() {
            assert!(FieldKind::Text.has_length_limits());
            assert!(FieldKind::Email.has_length_limits());
            assert!(FieldKind::Tel.has_length_limits());
            assert!(FieldKind::TextArea.has_length_limits());
            assert!(!FieldKind::Date.has_length_limits());
            assert!(!FieldKind::Dropdown.has_length_limits());
            assert!(!FieldKind::CheckboxSingle.has_length_limits());
        }

        #[test]
        fn test_option_label_lookup() {
            let def = with_options(field("color", FieldType::Dropdown), &["red", "blue"]);
            assert_eq!(def.option_label("blue"), Some("BLUE"));
            assert_eq!(def.option_label("green"), None);
        }

        #[test]
        fn test_section_lookups() {
            let s = schema(vec![
                section("one", vec![field("a", FieldType::Text)]),
                section("two", vec![field("b", FieldType::Text)]),
            ]);
            assert_eq!(s.last_section_index(), 1);
            assert_eq!(s.section_titles(), vec!["one", "two"]);
            assert!(s.field("zzz").is_none());
        }
    }
}
