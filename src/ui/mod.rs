//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod registration;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Registration => registration::draw(frame, main_area, app),
        View::Loading => registration::draw_loading(frame, main_area, app),
        View::Form => forms::draw_form(frame, main_area, app),
        View::Submitted => forms::draw_submitted(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog overlays everything
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.queued_errors());
    }
}
