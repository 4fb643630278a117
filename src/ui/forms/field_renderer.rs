//! Field rendering utilities for forms

use crate::schema::{FieldKind, FieldSpec, FieldValue};
use crate::state::field::display_value;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";
const MULTILINE_ROWS: u16 = 4;

/// Rows a field needs: its bordered box plus one line per error message
pub fn field_height(spec: &FieldSpec, error_count: usize) -> u16 {
    let body = match spec.kind {
        FieldKind::MultilineText => MULTILINE_ROWS,
        FieldKind::MultiChoice => spec.options.len().max(1) as u16,
        _ => 1,
    };
    body + 2 + error_count as u16
}

/// Everything needed to draw one field
pub struct FieldDraw<'a> {
    pub spec: &'a FieldSpec,
    pub value: &'a FieldValue,
    pub errors: &'a [String],
    pub is_active: bool,
    pub option_cursor: usize,
}

/// Draw a field box with its error messages underneath
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldDraw) {
    let error_rows = (field.errors.len() as u16).min(area.height);
    let box_area = Rect {
        height: area.height - error_rows,
        ..area
    };

    let border_color = match (field.is_active, field.errors.is_empty()) {
        (true, _) => Color::Cyan,
        (false, false) => Color::Red,
        (false, true) => Color::DarkGray,
    };
    let marker = if field.spec.required { " *" } else { "" };
    let block = Block::default()
        .title(format!(" {}{marker} ", field.spec.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let content = match field.spec.kind {
        FieldKind::MultiChoice => Paragraph::new(option_lines(field)),
        FieldKind::SingleChoice => Paragraph::new(choice_line(field)),
        _ => Paragraph::new(text_lines(field)).wrap(Wrap { trim: false }),
    };
    frame.render_widget(content.block(block), box_area);

    if error_rows > 0 {
        let error_area = Rect {
            y: box_area.y + box_area.height,
            height: error_rows,
            ..area
        };
        let lines: Vec<Line> = field
            .errors
            .iter()
            .map(|msg| {
                Line::from(Span::styled(
                    format!("  \u{2717} {msg}"),
                    Style::default().fg(Color::Red),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), error_area);
    }
}

fn text_lines<'a>(field: &FieldDraw) -> Vec<Line<'a>> {
    let shown = display_value(field.spec, field.value);
    if shown.is_empty() && !field.is_active {
        return vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let style = if field.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    // split('\n') keeps a trailing empty line so the cursor lands after a newline
    let mut lines: Vec<Line> = shown
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    if field.is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }
    lines
}

fn choice_line<'a>(field: &FieldDraw) -> Line<'a> {
    let shown = display_value(field.spec, field.value);
    let shown = if shown.is_empty() {
        "(none)".to_string()
    } else {
        shown
    };
    if field.is_active {
        Line::from(vec![
            Span::styled("\u{25c0} ", Style::default().fg(Color::Cyan)),
            Span::styled(shown, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" \u{25b6}", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(shown)
    }
}

fn option_lines<'a>(field: &FieldDraw) -> Vec<Line<'a>> {
    let selected = field.value.as_choices();
    field
        .spec
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let checked = selected.is_some_and(|s| s.contains(&option.value));
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if field.is_active && idx == field.option_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED)
            } else if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{mark} {}", option.label), style))
        })
        .collect()
}
