//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (tabs_area, main_area) = layout::create_layout(frame.area());

    layout::draw_tabs(frame, tabs_area, app);
    forms::draw_form(frame, main_area, app.state.active_form());
    layout::draw_status_bar(frame, app);

    // Error dialog renders last so it sits above everything else
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.error_queue.len());
    }
}
