//! Form navigation state machine
//!
//! [`FormState`] is the whole mutable state of a form: navigation, values and
//! errors. [`transition`] is a pure function from a state and an event to the
//! next state, so any session can be replayed from its event log.

use super::field::FieldValue;
use super::schema::{FormSchema, ValueShape};
use super::store::ValueStore;
use super::validator::{validate_section, ErrorMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which section is shown and whether the form is finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current_section: usize,
    pub submitted: bool,
}

/// Serializable state of one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub navigation: NavigationState,
    pub values: ValueStore,
    pub errors: ErrorMap,
}

/// Sections re-validated by `submit`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Only the last section, which is the one on screen
    #[default]
    FinalSection,
    /// Every section; the form moves back to the first invalid one
    AllSections,
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    SetValue { field_id: String, value: FieldValue },
    Advance,
    Retreat,
    Submit,
}

/// What an accepted event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A value was stored
    Updated,
    /// The visible section changed
    Moved { from: usize, to: usize },
    /// Validation failed; `section` is the one now shown
    Blocked {
        section: usize,
        invalid_fields: Vec<String>,
    },
    /// The form is finished; carries the final values
    Submitted(ValueStore),
}

/// Events fired outside their precondition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("form has already been submitted")]
    AlreadySubmitted,
    #[error("section {0} is the last section; there is nothing to advance to")]
    NoNextSection(usize),
    #[error("already at the first section")]
    NoPreviousSection,
    #[error("submit is only allowed from the last section (at {current}, last is {last})")]
    NotLastSection { current: usize, last: usize },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field_id}` takes a {expected} value, got a {actual}")]
    ShapeMismatch {
        field_id: String,
        expected: ValueShape,
        actual: ValueShape,
    },
}

impl FormState {
    pub fn current_section(&self) -> usize {
        self.navigation.current_section
    }

    pub fn is_submitted(&self) -> bool {
        self.navigation.submitted
    }

    /// Current message for `field_id`, if it is failing
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).and_then(|e| e.as_deref())
    }
}

/// Apply `event` to `state`, producing the next state
pub fn transition(
    schema: &FormSchema,
    state: &FormState,
    event: &FormEvent,
    policy: SubmitPolicy,
) -> Result<(FormState, Transition), TransitionError> {
    if state.navigation.submitted {
        return Err(TransitionError::AlreadySubmitted);
    }

    let current = state.navigation.current_section;
    let last = schema.last_section_index();
    let mut next = state.clone();

    match event {
        FormEvent::SetValue { field_id, value } => {
            let field = schema
                .field(field_id)
                .ok_or_else(|| TransitionError::UnknownField(field_id.clone()))?;
            let expected = field.kind().shape();
            if value.shape() != expected {
                return Err(TransitionError::ShapeMismatch {
                    field_id: field_id.clone(),
                    expected,
                    actual: value.shape(),
                });
            }
            next.values.set(field_id.clone(), value.clone());
            if let Some(entry) = next.errors.get_mut(field_id) {
                *entry = None;
            }
            Ok((next, Transition::Updated))
        }
        FormEvent::Advance => {
            if current >= last {
                return Err(TransitionError::NoNextSection(current));
            }
            let section = &schema.sections[current];
            let report = validate_section(section, &state.values);
            let invalid_fields = owned(report.invalid_fields(section));
            next.errors.extend(report.errors);
            if report.valid {
                next.navigation.current_section = current + 1;
                Ok((next, Transition::Moved { from: current, to: current + 1 }))
            } else {
                Ok((
                    next,
                    Transition::Blocked {
                        section: current,
                        invalid_fields,
                    },
                ))
            }
        }
        FormEvent::Retreat => {
            if current == 0 {
                return Err(TransitionError::NoPreviousSection);
            }
            next.navigation.current_section = current - 1;
            Ok((next, Transition::Moved { from: current, to: current - 1 }))
        }
        FormEvent::Submit => {
            if current != last {
                return Err(TransitionError::NotLastSection { current, last });
            }
            let checked = match policy {
                SubmitPolicy::FinalSection => last..=last,
                SubmitPolicy::AllSections => 0..=last,
            };

            let mut first_invalid = None;
            let mut invalid_fields = Vec::new();
            for index in checked {
                let section = &schema.sections[index];
                let report = validate_section(section, &state.values);
                if !report.valid {
                    first_invalid.get_or_insert(index);
                    invalid_fields.extend(owned(report.invalid_fields(section)));
                }
                next.errors.extend(report.errors);
            }

            match first_invalid {
                None => {
                    next.navigation.submitted = true;
                    let values = next.values.clone();
                    Ok((next, Transition::Submitted(values)))
                }
                Some(section) => {
                    next.navigation.current_section = section;
                    Ok((
                        next,
                        Transition::Blocked {
                            section,
                            invalid_fields,
                        },
                    ))
                }
            }
        }
    }
}

fn owned(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}
