//! Section progress bar

use crate::state::{Progress, StepStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Rows the progress block takes
pub const PROGRESS_HEIGHT: u16 = 3;

/// Draw "Section i of N", the eased gauge and one marker per section
pub fn draw_progress(frame: &mut Frame, area: Rect, progress: Progress, fill: f64, titles: &[&str]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Markers
        ])
        .split(area);

    let percent = (progress.ratio() * 100.0).round() as u16;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                progress.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {percent}%"), Style::default().fg(Color::DarkGray)),
        ])),
        chunks[0],
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(fill.clamp(0.0, 1.0))
            .label(""),
        chunks[1],
    );

    frame.render_widget(Paragraph::new(marker_line(progress, titles)), chunks[2]);
}

fn marker_line<'a>(progress: Progress, titles: &[&'a str]) -> Line<'a> {
    let mut spans = Vec::with_capacity(titles.len() * 2);
    for (index, title) in titles.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (mark, style) = match progress.step_status(index) {
            StepStatus::Completed => ("✓ ", Style::default().fg(Color::Green)),
            StepStatus::Current => (
                "● ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            StepStatus::Pending => ("○ ", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(mark, style));
        spans.push(Span::styled(*title, style));
    }
    Line::from(spans)
}
