//! Application state and core logic

use crate::api::{fetch_schema, ApiClient, FormApiTrait};
use crate::config::TuiConfig;
use crate::state::{
    cycle_choice, edit_text, is_selected, select, toggle_choice, toggle_flag, AppState, FieldDef,
    FieldValue, Form, FormSession, InputWidget, PendingAction, SectionButton, SubmitPolicy,
    SubmittedForm, TextEdit, Transition, TransitionError, ValueBinding, ValueStore, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form service client
    api: Box<dyn FormApiTrait>,
    /// Sections validated on submit
    policy: SubmitPolicy,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance talking to the configured service
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let api = ApiClient::from_config(config)?;
        tracing::info!(api = %config.api_base_url(), "starting");
        Ok(Self::with_api(Box::new(api), config.submit_policy()))
    }

    pub fn with_api(api: Box<dyn FormApiTrait>, policy: SubmitPolicy) -> Self {
        Self {
            state: AppState::default(),
            api,
            policy,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Whether a frame-rate redraw is needed
    pub fn is_animating(&self) -> bool {
        self.state.progress.is_animating()
    }

    /// Advance time-based state
    pub fn tick(&mut self) {
        self.state.progress.update();
    }

    pub fn has_pending(&self) -> bool {
        self.state.pending.is_some()
    }

    /// Run the queued service call, if any
    pub async fn run_pending(&mut self) {
        let Some(action) = self.state.pending.take() else {
            return;
        };

        match action {
            PendingAction::Register(user) => match self.api.create_user(&user).await {
                Ok(message) => {
                    tracing::info!(roll_number = %user.roll_number, "user registered");
                    self.status_message = Some(message);
                    self.state.pending = Some(PendingAction::FetchForm(user.roll_number.clone()));
                    self.state.user = Some(user);
                }
                Err(e) => {
                    tracing::warn!(roll_number = %user.roll_number, "registration failed: {e:#}");
                    self.state.current_view = View::Registration;
                    self.push_error(e.to_string());
                }
            },
            PendingAction::FetchForm(roll_number) => {
                match fetch_schema(self.api.as_mut(), &roll_number).await {
                    Ok(schema) => {
                        let session = FormSession::new(schema, self.policy);
                        self.state.start_form(session);
                    }
                    Err(e) => {
                        self.state.current_view = View::Registration;
                        self.push_error(e.to_string());
                    }
                }
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Registration => self.handle_registration_key(key),
            View::Loading => {}
            View::Form => self.handle_form_key(key),
            View::Submitted => self.handle_submitted_key(key)?,
        }

        Ok(())
    }

    fn handle_registration_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.registration;
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter => self.submit_registration(),
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) if is_plain(key) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
    }

    fn submit_registration(&mut self) {
        let form = &mut self.state.registration;
        match form.validate() {
            Err(message) => {
                form.error = Some(message.to_string());
            }
            Ok(user) => {
                form.error = None;
                tracing::info!(roll_number = %user.roll_number, "registering user");
                self.state.pending = Some(PendingAction::Register(user));
                self.state.current_view = View::Loading;
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.advance(),
                KeyCode::Char('p') => self.retreat(),
                KeyCode::Char('s') => self.submit(),
                _ => {}
            }
            return;
        }

        let Some(focus) = self.state.focus.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                focus.next_field();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                focus.prev_field();
                return;
            }
            _ => {}
        }

        if focus.is_buttons_row_active() {
            match key.code {
                KeyCode::Left => focus.prev_button(),
                KeyCode::Right => focus.next_button(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(button) = focus.selected() {
                        self.press(button);
                    }
                }
                _ => {}
            }
            return;
        }

        let def = match (&self.state.session, &self.state.focus) {
            (Some(session), Some(focus)) => focus.active_def(session).cloned(),
            _ => None,
        };
        if let Some(def) = def {
            self.handle_field_key(&def, key);
        }
    }

    /// Route a key to the focused field according to its value binding
    fn handle_field_key(&mut self, def: &FieldDef, key: KeyEvent) {
        let Some(current) = self.state.session.as_ref().map(|s| s.value(def)) else {
            return;
        };
        let binding = select(def);
        debug_assert_eq!(current.shape(), binding.shape);

        let next = match (binding.binding, key.code) {
            (ValueBinding::ReplaceText, KeyCode::Enter) if binding.widget == InputWidget::TextArea => {
                edit_text(def, current.as_text(), TextEdit::Insert('\n'))
            }
            (ValueBinding::ReplaceText, KeyCode::Backspace) => {
                edit_text(def, current.as_text(), TextEdit::Backspace)
            }
            (ValueBinding::ReplaceText, KeyCode::Char(c)) if is_plain(key) => {
                edit_text(def, current.as_text(), TextEdit::Insert(c))
            }
            (ValueBinding::SelectOne, KeyCode::Right) => {
                Some(cycle_choice(def, current.as_text(), true))
            }
            (ValueBinding::SelectOne, KeyCode::Left) => {
                Some(cycle_choice(def, current.as_text(), false))
            }
            (ValueBinding::ToggleChoices, KeyCode::Left | KeyCode::Right) => {
                if let Some(focus) = self.state.focus.as_mut() {
                    focus.move_option(def.options().len(), key.code == KeyCode::Right);
                }
                None
            }
            (ValueBinding::ToggleChoices, KeyCode::Char(' ')) => {
                let cursor = self.state.focus.as_ref().map_or(0, |f| f.option_cursor);
                def.options().get(cursor).map(|option| {
                    let checked = !is_selected(&current, &option.value);
                    toggle_choice(current.as_choices(), &option.value, checked)
                })
            }
            (ValueBinding::ToggleFlag, KeyCode::Char(' ')) => Some(toggle_flag(current.as_flag())),
            (_, KeyCode::Enter) => {
                if let Some(focus) = self.state.focus.as_mut() {
                    focus.next_field();
                }
                None
            }
            _ => None,
        };

        if let Some(value) = next {
            self.set_field_value(&def.field_id, value);
        }
    }

    fn set_field_value(&mut self, field_id: &str, value: FieldValue) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if let Err(e) = session.set_value(field_id, value) {
            tracing::warn!(field_id, "value not stored: {e}");
        }
    }

    fn press(&mut self, button: SectionButton) {
        match button {
            SectionButton::Previous => self.retreat(),
            SectionButton::Next => self.advance(),
            SectionButton::Submit => self.submit(),
        }
    }

    /// Move to the next section if the current one validates
    pub fn advance(&mut self) {
        let outcome = match self.state.session.as_mut() {
            Some(session) if session.can_advance() => session.advance(),
            _ => return,
        };
        self.after_transition(outcome);
    }

    /// Move to the previous section
    pub fn retreat(&mut self) {
        let outcome = match self.state.session.as_mut() {
            Some(session) if session.can_retreat() => session.retreat(),
            _ => return,
        };
        self.after_transition(outcome);
    }

    /// Submit the form from its last section
    pub fn submit(&mut self) {
        let outcome = match self.state.session.as_mut() {
            Some(session) if session.can_submit() => session.submit(),
            _ => return,
        };
        self.after_transition(outcome);
    }

    fn after_transition(
        &mut self,
        outcome: std::result::Result<Transition, TransitionError>,
    ) {
        match outcome {
            Ok(Transition::Updated) => {}
            Ok(Transition::Moved { .. }) => self.state.section_changed(),
            Ok(Transition::Blocked { invalid_fields, .. }) => {
                // Submit under the all-sections policy may have moved back
                self.state.section_changed();
                self.focus_field(invalid_fields.first().map(String::as_str));
                self.status_message = Some(match invalid_fields.len() {
                    1 => "1 field needs attention".to_string(),
                    n => format!("{n} fields need attention"),
                });
            }
            Ok(Transition::Submitted(values)) => self.finish(values),
            Err(e) => tracing::warn!("form event rejected: {e}"),
        }
    }

    fn focus_field(&mut self, field_id: Option<&str>) {
        let (Some(session), Some(focus), Some(field_id)) =
            (&self.state.session, self.state.focus.as_mut(), field_id)
        else {
            return;
        };
        if let Some(index) = session
            .current_section()
            .fields
            .iter()
            .position(|f| f.field_id == field_id)
        {
            focus.set_active_field(index);
        }
    }

    fn finish(&mut self, values: ValueStore) {
        let Some(session) = self.state.session.as_ref() else {
            return;
        };
        match SubmittedForm::new(session, values) {
            Ok(artifact) => {
                tracing::info!(
                    session = %artifact.session_id,
                    form_id = %artifact.form_id,
                    values = %artifact.values.to_json(),
                    "form data"
                );
                self.state.finish_form(artifact);
            }
            Err(e) => self.push_error(format!("Failed to render submission: {e}")),
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') => {
                let Some(json) = self.state.submitted.as_ref().map(|s| s.json.clone()) else {
                    return Ok(());
                };
                match self.copy_to_clipboard(&json) {
                    Ok(()) => self.status_message = Some("Copied to clipboard".to_string()),
                    Err(e) => self.push_error(format!("Failed to copy: {e}")),
                }
            }
            KeyCode::Char('n') => self.state.restart(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Key without Control or Alt held, as typed into a text input
fn is_plain(key: KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
