//! Keyboard focus within a form

use super::session::FormSession;
use super::schema::FieldDef;

/// Trait for common form focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Navigation buttons under a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionButton {
    Previous,
    Next,
    Submit,
}

impl SectionButton {
    pub fn label(&self) -> &'static str {
        match self {
            SectionButton::Previous => "Previous",
            SectionButton::Next => "Next",
            SectionButton::Submit => "Submit",
        }
    }
}

/// Buttons offered for the session's current section
pub fn section_buttons(session: &FormSession) -> Vec<SectionButton> {
    let mut buttons = Vec::with_capacity(2);
    if session.can_retreat() {
        buttons.push(SectionButton::Previous);
    }
    if session.can_advance() {
        buttons.push(SectionButton::Next);
    }
    if session.can_submit() {
        buttons.push(SectionButton::Submit);
    }
    buttons
}

/// Focus over the fields of one section plus its button row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFocus {
    fields: usize,
    buttons: Vec<SectionButton>,
    pub active_field_index: usize,
    pub selected_button: usize,
    /// Highlighted option inside a checkbox group
    pub option_cursor: usize,
}

impl SectionFocus {
    /// Focus the first field of the session's current section
    pub fn for_session(session: &FormSession) -> Self {
        let buttons = section_buttons(session);
        Self {
            fields: session.current_section().fields.len(),
            // Default to the forward action
            selected_button: buttons.len().saturating_sub(1),
            buttons,
            active_field_index: 0,
            option_cursor: 0,
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields
    }

    /// Field under focus, if any
    pub fn active_def<'a>(&self, session: &'a FormSession) -> Option<&'a FieldDef> {
        session
            .current_section()
            .fields
            .get(self.active_field_index)
    }

    pub fn buttons(&self) -> &[SectionButton] {
        &self.buttons
    }

    pub fn selected(&self) -> Option<SectionButton> {
        self.buttons.get(self.selected_button).copied()
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        if !self.buttons.is_empty() {
            self.selected_button = (self.selected_button + 1) % self.buttons.len();
        }
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.buttons.is_empty() {
            return;
        }
        if self.selected_button == 0 {
            self.selected_button = self.buttons.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Move the option cursor within a group of `count` options
    pub fn move_option(&mut self, count: usize, forward: bool) {
        if count == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % count
        } else if self.option_cursor == 0 {
            count - 1
        } else {
            self.option_cursor - 1
        };
    }
}

impl Form for SectionFocus {
    fn field_count(&self) -> usize {
        self.fields + 1 // fields, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields);
        self.option_cursor = 0;
    }
}
