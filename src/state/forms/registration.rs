//! Registration form shown before a schema is fetched

use super::field::FormField;
use super::focus::Form;
use serde::{Deserialize, Serialize};

/// Message shown when either registration field is blank
pub const REGISTRATION_REQUIRED: &str = "Roll Number and Name are required";

/// Identity sent to the registration endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub roll_number: String,
    pub name: String,
}

// Registration Form
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub roll_number: FormField,
    pub name: FormField,
    pub active_field_index: usize,
    /// Inline error under the form, cleared on the next attempt
    pub error: Option<String>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            roll_number: FormField::text("rollNumber", "Roll Number"),
            name: FormField::text("name", "Name"),
            active_field_index: 0,
            error: None,
        }
    }

    /// Returns true if the register button is focused
    pub fn is_button_active(&self) -> bool {
        self.active_field_index == 2
    }

    /// Check both fields are non-blank and build the payload.
    ///
    /// The payload carries the values as typed; only the blank check trims.
    pub fn validate(&self) -> Result<UserRegistration, &'static str> {
        if self.roll_number.as_text().trim().is_empty() || self.name.as_text().trim().is_empty() {
            return Err(REGISTRATION_REQUIRED);
        }
        Ok(UserRegistration {
            roll_number: self.roll_number.value.clone(),
            name: self.name.value.clone(),
        })
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.roll_number),
            1 => Some(&mut self.name),
            // Index 2 is the button row
            _ => None,
        }
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.roll_number),
            1 => Some(&self.name),
            _ => None,
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        3 // roll number, name, button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
}
