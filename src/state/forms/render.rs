//! Render selection: which input a field gets and how edits become values
//!
//! Presentation lives in `ui::forms`; this module only describes the input
//! affordance and the value contract behind it.

use super::field::FieldValue;
use super::schema::{FieldDef, FieldKind, ValueShape};

/// Input affordance for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputWidget {
    TextInput,
    EmailInput,
    PhoneInput,
    DateInput,
    TextArea,
    Select,
    RadioGroup,
    CheckboxGroup,
    Checkbox,
}

/// How a user interaction turns into a new value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueBinding {
    /// Whole string replaced on every edit
    ReplaceText,
    /// Single option value replaces the string
    SelectOne,
    /// Option values added on check, removed on uncheck
    ToggleChoices,
    /// Boolean replaced on toggle
    ToggleFlag,
}

/// Widget and value contract selected for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderBinding {
    pub widget: InputWidget,
    pub binding: ValueBinding,
    pub shape: ValueShape,
}

/// Select the widget and value contract for `field`
pub fn select(field: &FieldDef) -> RenderBinding {
    let kind = field.kind();
    let (widget, binding) = match kind {
        FieldKind::Text => (InputWidget::TextInput, ValueBinding::ReplaceText),
        FieldKind::Email => (InputWidget::EmailInput, ValueBinding::ReplaceText),
        FieldKind::Tel => (InputWidget::PhoneInput, ValueBinding::ReplaceText),
        FieldKind::Date => (InputWidget::DateInput, ValueBinding::ReplaceText),
        FieldKind::TextArea => (InputWidget::TextArea, ValueBinding::ReplaceText),
        FieldKind::Dropdown => (InputWidget::Select, ValueBinding::SelectOne),
        FieldKind::Radio => (InputWidget::RadioGroup, ValueBinding::SelectOne),
        FieldKind::CheckboxMulti => (InputWidget::CheckboxGroup, ValueBinding::ToggleChoices),
        FieldKind::CheckboxSingle => (InputWidget::Checkbox, ValueBinding::ToggleFlag),
    };
    RenderBinding {
        widget,
        binding,
        shape: kind.shape(),
    }
}

/// Keyboard edit applied to a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Clear,
}

/// Apply `edit` to the current text of `field`.
///
/// Returns `None` when nothing changes: an insert beyond a declared
/// `maxLength` is refused, as is a backspace on an empty value.
pub fn edit_text(field: &FieldDef, current: &str, edit: TextEdit) -> Option<FieldValue> {
    let mut next = current.to_string();
    match edit {
        TextEdit::Insert(c) => {
            let at_limit = field
                .max_length
                .filter(|m| *m > 0)
                .is_some_and(|max| current.chars().count() >= max);
            if at_limit {
                return None;
            }
            next.push(c);
        }
        TextEdit::Backspace => {
            next.pop()?;
        }
        TextEdit::Clear => {
            if current.is_empty() {
                return None;
            }
            next.clear();
        }
    }
    Some(FieldValue::Text(next))
}

/// Values a single-select field cycles through.
///
/// Dropdowns lead with an empty "Select an option" slot; radio groups only
/// offer their declared options.
pub fn choice_slots(field: &FieldDef) -> Vec<&str> {
    let mut slots: Vec<&str> = Vec::with_capacity(field.options().len() + 1);
    if field.kind() == FieldKind::Dropdown {
        slots.push("");
    }
    slots.extend(field.options().iter().map(|o| o.value.as_str()));
    slots
}

/// Next (or previous) single selection after `current`, wrapping around
pub fn cycle_choice(field: &FieldDef, current: &str, forward: bool) -> FieldValue {
    let slots = choice_slots(field);
    if slots.is_empty() {
        return FieldValue::Text(current.to_string());
    }
    let next = match slots.iter().position(|s| *s == current) {
        Some(i) if forward => (i + 1) % slots.len(),
        Some(0) => slots.len() - 1,
        Some(i) => i - 1,
        None if forward => 0,
        None => slots.len() - 1,
    };
    FieldValue::Text(slots[next].to_string())
}

/// Check or uncheck `option` against the current selection.
///
/// Checking appends (once); unchecking removes it and keeps the remaining
/// entries in their relative order.
pub fn toggle_choice(current: &[String], option: &str, checked: bool) -> FieldValue {
    let mut next: Vec<String> = current.iter().filter(|v| *v != option).cloned().collect();
    if checked {
        match current.iter().position(|v| v == option) {
            Some(i) => next.insert(i.min(next.len()), option.to_string()),
            None => next.push(option.to_string()),
        }
    }
    FieldValue::Choices(next)
}

/// Flip a single checkbox
pub fn toggle_flag(current: bool) -> FieldValue {
    FieldValue::Flag(!current)
}

/// Whether `option` is part of the current selection of a choice field
pub fn is_selected(value: &FieldValue, option: &str) -> bool {
    match value {
        FieldValue::Text(s) => s == option,
        FieldValue::Choices(v) => v.iter().any(|c| c == option),
        FieldValue::Flag(_) => false,
    }
}
