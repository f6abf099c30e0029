//! Client-side field and section validation
//!
//! Validation failures are data: they come back as messages in an
//! [`ErrorMap`] and are never raised as errors.

use super::field::FieldValue;
use super::schema::{FieldDef, FieldKind, Section};
use super::store::ValueStore;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Number of digits a phone number must contain once separators are stripped
pub const PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Field id → current message, `None` once a field is confirmed valid
pub type ErrorMap = BTreeMap<String, Option<String>>;

/// Failure classes, in the order they are checked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Minimum length is {0} characters")]
    TooShort(usize),
    #[error("Maximum length is {0} characters")]
    TooLong(usize),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

/// Run the rule chain for one field; the first failing rule wins
pub fn check_field(field: &FieldDef, value: &FieldValue) -> Result<(), FieldError> {
    if field.required && value.is_empty() {
        return Err(FieldError::Required);
    }

    let kind = field.kind();
    let FieldValue::Text(text) = value else {
        return Ok(());
    };

    if kind.has_length_limits() {
        let len = text.chars().count();
        if let Some(min) = field.min_length.filter(|m| *m > 0) {
            if len < min {
                return Err(FieldError::TooShort(min));
            }
        }
        if let Some(max) = field.max_length.filter(|m| *m > 0) {
            if len > max {
                return Err(FieldError::TooLong(max));
            }
        }
    }

    if text.is_empty() {
        return Ok(());
    }

    match kind {
        FieldKind::Email if !EMAIL_PATTERN.is_match(text) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !is_phone_number(text) => Err(FieldError::InvalidPhone),
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Tel
        | FieldKind::Date
        | FieldKind::TextArea
        | FieldKind::Dropdown
        | FieldKind::Radio
        | FieldKind::CheckboxSingle
        | FieldKind::CheckboxMulti => Ok(()),
    }
}

/// Validate one field, producing the user-facing message.
///
/// A schema-declared message replaces only the "required" text; length and
/// format failures keep their fixed wording.
pub fn validate_field(field: &FieldDef, value: &FieldValue) -> Option<String> {
    match check_field(field, value) {
        Ok(()) => None,
        Err(FieldError::Required) => Some(
            field
                .validation_message()
                .map(str::to_string)
                .unwrap_or_else(|| FieldError::Required.to_string()),
        ),
        Err(err) => Some(err.to_string()),
    }
}

fn is_phone_number(text: &str) -> bool {
    text.chars().filter(|c| c.is_ascii_digit()).count() == PHONE_DIGITS
}

/// Result of validating every field of one section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionReport {
    /// One entry per field of the section
    pub errors: ErrorMap,
    pub valid: bool,
}

impl SectionReport {
    /// Ids of the fields that failed, in section order
    pub fn invalid_fields<'a>(&self, section: &'a Section) -> Vec<&'a str> {
        section
            .fields
            .iter()
            .filter(|f| matches!(self.errors.get(&f.field_id), Some(Some(_))))
            .map(|f| f.field_id.as_str())
            .collect()
    }
}

/// Validate every field in `section` against the values in `store`
pub fn validate_section(section: &Section, store: &ValueStore) -> SectionReport {
    let errors: ErrorMap = section
        .fields
        .iter()
        .map(|field| {
            let value = store.value_for(field);
            (field.field_id.clone(), validate_field(field, &value))
        })
        .collect();
    let valid = errors.values().all(Option::is_none);

    tracing::debug!(
        section = %section.title,
        valid,
        failing = errors.values().filter(|e| e.is_some()).count(),
        "validated section"
    );

    SectionReport { errors, valid }
}
