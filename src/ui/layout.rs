//! Layout components (header, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header height in rows (two text lines + bottom border)
pub const HEADER_HEIGHT: u16 = 3;

/// Split the screen into header and main content, reserving the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the header: form title and metadata on the left, user on the right
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let session = app
        .state
        .session
        .as_ref()
        .filter(|_| matches!(app.state.current_view, View::Form | View::Submitted));

    let (title, subtitle) = match session {
        Some(session) => {
            let schema = session.schema();
            (
                schema.form_title.clone(),
                format!("Form ID: {} | Version: {}", schema.form_id, schema.version),
            )
        }
        None => (
            "Dynamic Form".to_string(),
            "Register to load your form".to_string(),
        ),
    };

    let left = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(left, inner);

    if let Some(user) = &app.state.user {
        let right = Paragraph::new(vec![
            Line::from(Span::styled(
                user.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
            Line::from(Span::styled(
                format!("Roll: {}", user.roll_number),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        ]);
        frame.render_widget(right, inner);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: area.x,
        y: area.bottom().saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            get_view_hints(app.state.current_view),
            Style::default().fg(Color::Gray),
        ),
    ];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: status_area.right().saturating_sub(quit_hint.len() as u16),
        y: status_area.y,
        width: (quit_hint.len() as u16).min(status_area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> &'static str {
    match view {
        View::Registration => "Tab:next  Enter:register",
        View::Loading => "Please wait...",
        View::Form => {
            "Tab:next  ←/→:choose  Space:toggle  ^N:next  ^P:previous  ^S:submit"
        }
        View::Submitted => "y:copy  n:new form  q:quit",
    }
}
