//! Registration and loading screens

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_text_input;
use super::layout::centered_rect;
use crate::app::App;
use crate::state::PendingAction;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the registration form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.registration;
    let area = centered_rect(50, 17, area);

    let block = Block::default()
        .title(Span::styled(
            " User Registration ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Error
            Constraint::Length(3),             // Roll number
            Constraint::Length(1),
            Constraint::Length(3),             // Name
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT), // Register
            Constraint::Min(0),
        ])
        .horizontal_margin(2)
        .split(inner);

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: true }),
            chunks[0],
        );
    }

    for (index, chunk) in [(0, chunks[1]), (1, chunks[3])] {
        if let Some(field) = form.get_field(index) {
            draw_text_input(frame, chunk, field, form.active_field_index == index);
        }
    }

    render_button(
        frame,
        chunks[5],
        "Register",
        form.is_button_active(),
        true,
        Some(Color::Blue),
    );
}

/// Draw the in-flight request screen
pub fn draw_loading(frame: &mut Frame, area: Rect, app: &App) {
    let message = match &app.state.pending {
        Some(PendingAction::Register(_)) => "Registering...",
        _ => "Loading form...",
    };
    let area = centered_rect(40, 3, area);
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        area,
    );
}
