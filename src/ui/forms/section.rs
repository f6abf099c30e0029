//! Current section of a form: progress, fields and navigation buttons

use super::field_renderer::{draw_schema_field, field_height, visible_range};
use super::progress::{draw_progress, PROGRESS_HEIGHT};
use crate::app::App;
use crate::state::{FormSession, SectionButton, SectionFocus};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BUTTON_WIDTH: u16 = 14;

/// Draw the form view
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(session), Some(focus)) = (&app.state.session, &app.state.focus) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PROGRESS_HEIGHT), // Progress
            Constraint::Min(0),                  // Section
            Constraint::Length(BUTTON_HEIGHT),   // Buttons
        ])
        .margin(1)
        .split(area);

    draw_progress(
        frame,
        chunks[0],
        session.progress(),
        app.state.progress.value(),
        &session.schema().section_titles(),
    );
    draw_section(frame, chunks[1], session, focus);
    draw_buttons(frame, chunks[2], session, focus);
}

fn draw_section(frame: &mut Frame, area: Rect, session: &FormSession, focus: &SectionFocus) {
    let section = session.current_section();

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", section.title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focus.is_buttons_row_active() {
            Color::DarkGray
        } else {
            Color::Cyan
        }));
    let mut inner = block.inner(area);
    frame.render_widget(block, area);

    if !section.description.is_empty() && inner.height > 2 {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                section.description.as_str(),
                Style::default().fg(Color::Gray),
            ))),
            inner,
        );
        inner.y += 2;
        inner.height -= 2;
    }

    let heights: Vec<u16> = section.fields.iter().map(field_height).collect();
    let range = visible_range(&heights, inner.height, focus.active_field_index);

    let mut y = inner.y;
    for index in range {
        let remaining = inner.bottom().saturating_sub(y);
        if remaining == 0 {
            break;
        }
        let def = &section.fields[index];
        let field_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: heights[index].min(remaining),
        };
        let is_active = focus.active_field_index == index;
        draw_schema_field(
            frame,
            field_area,
            def,
            &session.value(def),
            session.error(&def.field_id),
            is_active,
            if is_active { focus.option_cursor } else { 0 },
        );
        y += field_area.height;
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, session: &FormSession, focus: &SectionFocus) {
    let forward = if session.is_last_section() {
        SectionButton::Submit
    } else {
        SectionButton::Next
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BUTTON_WIDTH), // Previous
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH), // Next / Submit
        ])
        .split(area);

    let is_selected =
        |button: SectionButton| focus.is_buttons_row_active() && focus.selected() == Some(button);

    render_button(
        frame,
        chunks[0],
        SectionButton::Previous.label(),
        is_selected(SectionButton::Previous),
        session.can_retreat(),
        None,
    );
    render_button(
        frame,
        chunks[2],
        forward.label(),
        is_selected(forward),
        true,
        Some(if forward == SectionButton::Submit {
            Color::Green
        } else {
            Color::Blue
        }),
    );
}
