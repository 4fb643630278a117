//! Layout components (form tabs, status bar)

use super::components::{render_tab, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{PASTE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::schema::FieldKind;
use crate::state::{Form, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into a tab row and the form area, leaving the last row for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Tabs
            Constraint::Min(0),                // Form
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw one tab per form
pub fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let views = View::all();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Min(0),
        ])
        .split(area);

    for (idx, view) in views.iter().enumerate() {
        let key = format!("F{}", idx + 1);
        let busy = app.state.form(*view).is_submitting();
        render_tab(
            frame,
            chunks[idx],
            &key,
            view.label(),
            app.state.current_view == *view,
            busy,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", get_form_hints(app.state.active_form())),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " Esc:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused row of a form
fn get_form_hints(form: &dyn Form) -> String {
    if form.is_submit_active() {
        return format!("Enter/{SUBMIT_SHORTCUT}:submit  Tab:next  F1/F2:form");
    }
    match form.active_spec().map(|spec| spec.kind) {
        Some(FieldKind::SingleChoice) => {
            format!("\u{2190}/\u{2192}:choose  Tab:next  {SUBMIT_SHORTCUT}:submit")
        }
        Some(FieldKind::MultiChoice) => {
            format!("\u{2191}/\u{2193}:move  Space:toggle  Tab:next  {SUBMIT_SHORTCUT}:submit")
        }
        Some(FieldKind::MultilineText) => {
            format!("Enter:newline  {PASTE_SHORTCUT}:paste  Tab:next  {SUBMIT_SHORTCUT}:submit")
        }
        Some(FieldKind::FileReference) => {
            format!("type a file path  Tab:next  {SUBMIT_SHORTCUT}:submit")
        }
        _ => format!("Tab:next  {PASTE_SHORTCUT}:paste  {SUBMIT_SHORTCUT}:submit  F1/F2:form"),
    }
}
