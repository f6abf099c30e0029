//! Submitted form view

use crate::app::App;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the confirmation and the submitted JSON
pub fn draw_submitted(frame: &mut Frame, area: Rect, app: &App) {
    let Some(submitted) = &app.state.submitted else {
        return;
    };

    let json_rows = submitted.json.lines().count() as u16;
    let area = centered_rect(70, json_rows + 7, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Banner
            Constraint::Length(1), // Details
            Constraint::Length(1),
            Constraint::Min(3), // JSON
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Form Submitted Successfully!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(submitted.form_title.as_str()),
            Span::styled(
                format!(
                    "  submitted {}",
                    submitted.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        chunks[1],
    );

    let block = Block::default()
        .title(" Form Data ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(submitted.json.as_str())
            .wrap(Wrap { trim: false })
            .block(block),
        chunks[3],
    );
}
