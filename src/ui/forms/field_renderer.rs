//! Field rendering utilities for forms

use crate::state::{is_selected, select, FieldDef, FieldValue, FormField, InputWidget};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::ops::Range;

const CURSOR: &str = "▌";
const TEXTAREA_ROWS: u16 = 4;

fn active_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a registration text input
pub fn draw_text_input(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let cursor = if is_active { CURSOR } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::raw(field.as_text()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(active_style(is_active));

    frame.render_widget(content.block(block), area);
}

/// Rows a schema field takes, including its error line
pub fn field_height(def: &FieldDef) -> u16 {
    let body = match select(def).widget {
        InputWidget::TextArea => TEXTAREA_ROWS,
        InputWidget::CheckboxGroup => def.options().len().max(1) as u16,
        _ => 1,
    };
    body + 2 + 1 // borders, error line
}

/// Fields `start..end` to show so that `active` is visible within `available` rows
pub fn visible_range(heights: &[u16], available: u16, active: usize) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }

    start..end.max(active + 1)
}

/// Text shown for a single-select value: the option label, or the placeholder slot
pub fn choice_display<'a>(def: &'a FieldDef, value: &'a str) -> &'a str {
    if value.is_empty() {
        return "Select an option";
    }
    def.option_label(value).unwrap_or(value)
}

/// Draw a schema-driven field with its error line
pub fn draw_schema_field(
    frame: &mut Frame,
    area: Rect,
    def: &FieldDef,
    value: &FieldValue,
    error: Option<&str>,
    is_active: bool,
    option_cursor: usize,
) {
    let border_color = match (is_active, error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };

    let mut title = vec![Span::raw(format!(" {}", def.label))];
    if def.required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    title.push(Span::raw(" "));

    let mut block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if let Some(max) = def.max_length.filter(|m| *m > 0) {
        if def.kind().has_length_limits() {
            let count = value.as_text().chars().count();
            block = block.title_bottom(Line::from(format!(" {count}/{max} ")).right_aligned());
        }
    }

    let input_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let lines = field_lines(def, value, is_active, option_cursor);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        input_area,
    );

    if let Some(message) = error {
        if area.height > 1 {
            let error_area = Rect {
                y: area.bottom() - 1,
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {message}"),
                    Style::default().fg(Color::Red),
                )),
                error_area,
            );
        }
    }
}

fn field_lines<'a>(
    def: &'a FieldDef,
    value: &'a FieldValue,
    is_active: bool,
    option_cursor: usize,
) -> Vec<Line<'a>> {
    let cursor = Span::styled(if is_active { CURSOR } else { "" }, active_style(true));
    let placeholder_style = Style::default().fg(Color::DarkGray);

    match select(def).widget {
        InputWidget::TextInput
        | InputWidget::EmailInput
        | InputWidget::PhoneInput
        | InputWidget::DateInput => {
            let text = value.as_text();
            if text.is_empty() && !is_active {
                let hint = match (def.placeholder.as_deref(), def.kind()) {
                    (Some(p), _) => p,
                    (None, crate::state::FieldKind::Date) => "YYYY-MM-DD",
                    (None, _) => "",
                };
                return vec![Line::from(Span::styled(hint, placeholder_style))];
            }
            vec![Line::from(vec![Span::raw(text), cursor])]
        }
        InputWidget::TextArea => {
            let text = value.as_text();
            if text.is_empty() && !is_active {
                let hint = def.placeholder.as_deref().unwrap_or("");
                return vec![Line::from(Span::styled(hint, placeholder_style))];
            }
            let mut lines: Vec<Line> = text.split('\n').map(Line::from).collect();
            if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
            lines
        }
        InputWidget::Select => {
            let shown = choice_display(def, value.as_text());
            let style = if value.as_text().is_empty() {
                placeholder_style
            } else {
                Style::default()
            };
            vec![Line::from(vec![
                Span::styled("◀ ", active_style(is_active)),
                Span::styled(shown, style),
                Span::styled(" ▶", active_style(is_active)),
            ])]
        }
        InputWidget::RadioGroup => {
            let mut spans = Vec::new();
            for option in def.options() {
                let mark = if is_selected(value, &option.value) {
                    "(•) "
                } else {
                    "( ) "
                };
                spans.push(Span::styled(mark, active_style(is_active)));
                spans.push(Span::raw(option.label.as_str()));
                spans.push(Span::raw("   "));
            }
            vec![Line::from(spans)]
        }
        InputWidget::CheckboxGroup => def
            .options()
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let highlighted = is_active && i == option_cursor;
                let mark = if is_selected(value, &option.value) {
                    "[x] "
                } else {
                    "[ ] "
                };
                let label_style = if highlighted {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(if highlighted { "› " } else { "  " }, active_style(true)),
                    Span::styled(mark, active_style(is_active)),
                    Span::styled(option.label.as_str(), label_style),
                ])
            })
            .collect(),
        InputWidget::Checkbox => {
            let mark = if value.as_flag() { "[x] " } else { "[ ] " };
            vec![Line::from(vec![
                Span::styled(mark, active_style(is_active)),
                Span::raw(def.label.as_str()),
            ])]
        }
    }
}
