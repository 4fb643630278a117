//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button; a disabled button keeps its focus border but greys its label
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Color,
) {
    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = match (is_enabled, is_selected) {
        (false, _) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        (true, true) => Style::default().fg(accent).add_modifier(Modifier::BOLD),
        (true, false) => Style::default(),
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a form tab with its function key; a busy form shows a marker
pub fn render_tab(
    frame: &mut Frame,
    area: Rect,
    key: &str,
    label: &str,
    is_selected: bool,
    is_busy: bool,
) {
    let marker = if is_busy { " \u{2026}" } else { "" };
    let content = format!("{key} {label}{marker}");
    render_button(frame, area, &content, is_selected, true, Color::Cyan);
}
