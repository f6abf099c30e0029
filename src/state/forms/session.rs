//! Form session: one schema, its state, and the events applied so far

use super::field::FieldValue;
use super::form_state::{transition, FormEvent, FormState, SubmitPolicy, Transition, TransitionError};
use super::progress::Progress;
use super::schema::{FieldDef, FormSchema, Section};
use super::store::ValueStore;
use uuid::Uuid;

/// Owner of a form's schema and state.
///
/// All mutation goes through [`FormSession::apply`], which runs the pure
/// [`transition`] function and records accepted events for replay. Calls are
/// expected to be serialized by the caller.
#[derive(Debug, Clone)]
pub struct FormSession {
    id: Uuid,
    schema: FormSchema,
    state: FormState,
    policy: SubmitPolicy,
    history: Vec<FormEvent>,
}

impl FormSession {
    pub fn new(schema: FormSchema, policy: SubmitPolicy) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            form_id = %schema.form_id,
            version = %schema.version,
            sections = schema.section_count(),
            "form session started"
        );
        Self {
            id,
            schema,
            state: FormState::default(),
            policy,
            history: Vec::new(),
        }
    }

    /// Rebuild a session by applying `events` in order
    #[allow(dead_code)]
    pub fn replay(
        schema: FormSchema,
        policy: SubmitPolicy,
        events: impl IntoIterator<Item = FormEvent>,
    ) -> Result<Self, TransitionError> {
        let mut session = Self::new(schema, policy);
        for event in events {
            session.apply(event)?;
        }
        Ok(session)
    }

    /// Apply one event; rejected events leave the session unchanged
    pub fn apply(&mut self, event: FormEvent) -> Result<Transition, TransitionError> {
        let (next, outcome) = match transition(&self.schema, &self.state, &event, self.policy) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(session = %self.id, ?event, "rejected form event: {err}");
                return Err(err);
            }
        };

        match &outcome {
            Transition::Updated => {}
            Transition::Moved { from, to } => {
                tracing::info!(session = %self.id, from, to, "section changed");
            }
            Transition::Blocked {
                section,
                invalid_fields,
            } => {
                tracing::info!(
                    session = %self.id,
                    section,
                    ?invalid_fields,
                    "section has validation errors"
                );
            }
            Transition::Submitted(values) => {
                tracing::info!(
                    session = %self.id,
                    fields = values.len(),
                    "form submitted"
                );
            }
        }

        self.state = next;
        self.history.push(event);
        Ok(outcome)
    }

    /// Store a value for `field_id`, clearing any error it has
    pub fn set_value(
        &mut self,
        field_id: impl Into<String>,
        value: FieldValue,
    ) -> Result<Transition, TransitionError> {
        self.apply(FormEvent::SetValue {
            field_id: field_id.into(),
            value,
        })
    }

    pub fn advance(&mut self) -> Result<Transition, TransitionError> {
        self.apply(FormEvent::Advance)
    }

    pub fn retreat(&mut self) -> Result<Transition, TransitionError> {
        self.apply(FormEvent::Retreat)
    }

    pub fn submit(&mut self) -> Result<Transition, TransitionError> {
        self.apply(FormEvent::Submit)
    }

    pub fn can_advance(&self) -> bool {
        !self.is_submitted() && !self.is_last_section()
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_submitted() && self.current_index() > 0
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitted() && self.is_last_section()
    }

    pub fn is_last_section(&self) -> bool {
        self.current_index() == self.schema.last_section_index()
    }

    pub fn is_submitted(&self) -> bool {
        self.state.is_submitted()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_section()
    }

    pub fn current_section(&self) -> &Section {
        &self.schema.sections[self.current_index()]
    }

    /// Current value of `field`, resolved to its empty default when unset
    pub fn value(&self, field: &FieldDef) -> FieldValue {
        self.state.values.value_for(field)
    }

    /// Current error message for `field_id`
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.state.error(field_id)
    }

    #[allow(dead_code)]
    pub fn values(&self) -> &ValueStore {
        &self.state.values
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[allow(dead_code)]
    pub fn history(&self) -> &[FormEvent] {
        &self.history
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.current_index(), self.schema.section_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::render::toggle_choice;
    use crate::state::forms::schema::fixtures::{field, required, schema, section, with_options};
    use crate::state::forms::schema::FieldType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn two_sections() -> FormSchema {
        schema(vec![
            section("Identity", vec![required("name", FieldType::Text)]),
            section("Consent", vec![required("agree", FieldType::Checkbox)]),
        ])
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut session = FormSession::new(two_sections(), SubmitPolicy::FinalSection);

        // Submitting from the first section is a contract violation
        assert!(!session.can_submit());
        assert_eq!(
            session.submit(),
            Err(TransitionError::NotLastSection { current: 0, last: 1 })
        );

        // Advancing with an empty name fails and keeps the index
        let blocked = session.advance().unwrap();
        assert!(matches!(blocked, Transition::Blocked { section: 0, .. }));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.error("name"), Some("This field is required"));

        session
            .set_value("name", FieldValue::Text("Alice".into()))
            .unwrap();
        assert_eq!(session.error("name"), None);
        assert_eq!(session.advance().unwrap(), Transition::Moved { from: 0, to: 1 });
        assert_eq!(session.current_index(), 1);

        let blocked = session.submit().unwrap();
        assert!(matches!(blocked, Transition::Blocked { section: 1, .. }));
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_submitted());

        session.set_value("agree", FieldValue::Flag(true)).unwrap();
        let values = match session.submit().unwrap() {
            Transition::Submitted(values) => values,
            other => panic!("expected submission, got {other:?}"),
        };
        assert!(session.is_submitted());
        assert_eq!(values.to_json(), json!({ "name": "Alice", "agree": true }));
        // Submission reads the store without clearing it
        assert_eq!(session.values().len(), 2);
    }

    #[test]
    fn test_rejected_event_is_not_recorded() {
        let mut session = FormSession::new(two_sections(), SubmitPolicy::FinalSection);
        assert!(session.retreat().is_err());
        assert!(session.history().is_empty());
        session.advance().unwrap();
        assert_eq!(session.history(), &[FormEvent::Advance]);
    }

    #[test]
    fn test_replay_reproduces_state() {
        let mut live = FormSession::new(two_sections(), SubmitPolicy::FinalSection);
        live.advance().unwrap();
        live.set_value("name", FieldValue::Text("Bo".into())).unwrap();
        live.advance().unwrap();
        live.retreat().unwrap();

        let replayed = FormSession::replay(
            two_sections(),
            SubmitPolicy::FinalSection,
            live.history().to_vec(),
        )
        .unwrap();
        assert_eq!(replayed.state(), live.state());
        assert_ne!(replayed.id(), live.id());
    }

    #[test]
    fn test_replay_stops_at_first_violation() {
        let result = FormSession::replay(
            two_sections(),
            SubmitPolicy::FinalSection,
            vec![FormEvent::Retreat],
        );
        assert_eq!(result.unwrap_err(), TransitionError::NoPreviousSection);
    }

    #[test]
    fn test_multi_select_through_session() {
        let s = schema(vec![section(
            "Topics",
            vec![with_options(field("topics", FieldType::Checkbox), &["rust", "go"])],
        )]);
        let def = s.field("topics").unwrap().clone();
        let mut session = FormSession::new(s, SubmitPolicy::FinalSection);

        for (option, checked) in [("rust", true), ("go", true), ("rust", false)] {
            let current = session.value(&def);
            let next = toggle_choice(current.as_choices(), option, checked);
            session.set_value("topics", next).unwrap();
        }

        assert_eq!(
            session.value(&def),
            FieldValue::Choices(vec!["go".to_string()])
        );
    }

    #[test]
    fn test_guards_track_position() {
        let mut session = FormSession::new(two_sections(), SubmitPolicy::FinalSection);
        assert!(session.can_advance());
        assert!(!session.can_retreat());
        assert!(!session.can_submit());

        session.set_value("name", FieldValue::Text("A".into())).unwrap();
        session.advance().unwrap();
        assert!(!session.can_advance());
        assert!(session.can_retreat());
        assert!(session.can_submit());

        session.set_value("agree", FieldValue::Flag(true)).unwrap();
        session.submit().unwrap();
        assert!(!session.can_advance());
        assert!(!session.can_retreat());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_single_section_form_submits_directly() {
        let s = schema(vec![section("Only", vec![field("note", FieldType::Textarea)])]);
        let mut session = FormSession::new(s, SubmitPolicy::FinalSection);
        assert!(session.can_submit());
        assert!(!session.can_advance());
        assert!(matches!(session.submit().unwrap(), Transition::Submitted(_)));
    }

    #[test]
    fn test_progress_follows_section() {
        let mut session = FormSession::new(two_sections(), SubmitPolicy::FinalSection);
        assert_eq!(session.progress().current_step(), 1);
        session.set_value("name", FieldValue::Text("A".into())).unwrap();
        session.advance().unwrap();
        assert_eq!(session.progress().current_step(), 2);
        assert_eq!(session.progress().total_steps(), 2);
    }
}
