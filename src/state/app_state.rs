//! Application state definitions

use super::forms::{FormSession, RegistrationForm, SectionFocus, UserRegistration, ValueStore};
use super::progress_animation::ProgressAnimation;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Registration,
    /// Registration or schema fetch in flight
    Loading,
    Form,
    Submitted,
}

/// Service call the event loop runs before the next frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Register(UserRegistration),
    FetchForm(String),
}

/// Final artifact of a submitted form
#[derive(Debug, Clone)]
pub struct SubmittedForm {
    pub session_id: Uuid,
    pub form_id: String,
    pub form_title: String,
    pub submitted_at: DateTime<Utc>,
    pub values: ValueStore,
    /// Pretty-printed JSON of `values`
    pub json: String,
}

impl SubmittedForm {
    pub fn new(session: &FormSession, values: ValueStore) -> serde_json::Result<Self> {
        let json = serde_json::to_string_pretty(&values.to_json())?;
        Ok(Self {
            session_id: session.id(),
            form_id: session.schema().form_id.clone(),
            form_title: session.schema().form_title.clone(),
            submitted_at: Utc::now(),
            values,
            json,
        })
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Registration
    pub registration: RegistrationForm,
    pub user: Option<UserRegistration>,

    // Form
    pub session: Option<FormSession>,
    pub focus: Option<SectionFocus>,
    pub progress: ProgressAnimation,
    pub submitted: Option<SubmittedForm>,

    // Work queued for the event loop
    pub pending: Option<PendingAction>,

    // Modal error queue
    errors: VecDeque<String>,
}

impl AppState {
    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Number of queued errors behind the current one
    pub fn queued_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Show a freshly loaded form at its first section
    pub fn start_form(&mut self, session: FormSession) {
        self.progress = ProgressAnimation::settled(0.0);
        self.progress.retarget(session.progress().ratio());
        self.focus = Some(SectionFocus::for_session(&session));
        self.session = Some(session);
        self.submitted = None;
        self.current_view = View::Form;
    }

    /// Rebuild focus and progress after the visible section changed
    pub fn section_changed(&mut self) {
        if let Some(session) = &self.session {
            self.focus = Some(SectionFocus::for_session(session));
            self.progress.retarget(session.progress().ratio());
        }
    }

    /// Leave the form for the submitted view
    pub fn finish_form(&mut self, artifact: SubmittedForm) {
        self.focus = None;
        self.submitted = Some(artifact);
        self.current_view = View::Submitted;
    }

    /// Back to an empty registration screen, keeping nothing from the form
    pub fn restart(&mut self) {
        self.registration = RegistrationForm::new();
        self.user = None;
        self.session = None;
        self.focus = None;
        self.submitted = None;
        self.pending = None;
        self.progress = ProgressAnimation::default();
        self.current_view = View::Registration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldValue, SubmitPolicy};
    use crate::state::FormSchema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> FormSession {
        let schema = FormSchema::from_document(json!({
            "form": {
                "formId": "f-1",
                "formTitle": "Survey",
                "version": "1",
                "sections": [
                    { "title": "A", "fields": [{ "fieldId": "name", "type": "text", "label": "Name" }] },
                    { "title": "B", "fields": [{ "fieldId": "agree", "type": "checkbox", "label": "Agree" }] }
                ]
            }
        }))
        .unwrap();
        FormSession::new(schema, SubmitPolicy::FinalSection)
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            assert_eq!(state.queued_errors(), 1);
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert_eq!(state.current_error(), None);
        }
    }

    #[test]
    fn test_default_view_is_registration() {
        assert_eq!(AppState::default().current_view, View::Registration);
    }

    #[test]
    fn test_start_form_focuses_first_section() {
        let mut state = AppState::default();
        state.start_form(session());
        assert_eq!(state.current_view, View::Form);
        let focus = state.focus.as_ref().unwrap();
        assert_eq!(focus.active_field_index, 0);
    }

    #[test]
    fn test_section_changed_rebuilds_focus() {
        let mut state = AppState::default();
        state.start_form(session());
        if let Some(focus) = state.focus.as_mut() {
            focus.active_field_index = 1;
        }
        let session = state.session.as_mut().unwrap();
        session.advance().unwrap();
        state.section_changed();
        assert_eq!(state.focus.as_ref().unwrap().active_field_index, 0);
    }

    #[test]
    fn test_submitted_form_renders_json() {
        let mut s = session();
        s.set_value("name", FieldValue::Text("Alice".into())).unwrap();
        let artifact = SubmittedForm::new(&s, s.values().clone()).unwrap();
        assert_eq!(artifact.form_id, "f-1");
        assert!(artifact.json.contains("\"name\": \"Alice\""));
    }

    #[test]
    fn test_restart_clears_form() {
        let mut state = AppState::default();
        state.start_form(session());
        state.restart();
        assert_eq!(state.current_view, View::Registration);
        assert!(state.session.is_none());
        assert!(state.focus.is_none());
    }
}
