//! Generic form rendering: fields, submit error banner and submit button

use super::field_renderer::{draw_field, field_height, FieldDraw};
use crate::schema::FieldValue;
use crate::state::Form;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a form inside a titled border
pub fn draw_form(frame: &mut Frame, area: Rect, form: &dyn Form) {
    let border_color = if form.is_submitting() {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Every row the form can show: fields first, then the submit button
    let mut heights: Vec<u16> = form
        .schema()
        .fields
        .iter()
        .map(|spec| field_height(spec, form.errors().get(&spec.name).map_or(0, <[_]>::len)))
        .collect();
    heights.push(BUTTON_HEIGHT);

    let banner_height = u16::from(form.submit_error().is_some());
    let rows_area = Rect {
        height: inner.height.saturating_sub(banner_height),
        ..inner
    };

    let (first, last) = visible_rows(&heights, form.active_field(), rows_area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            heights[first..=last]
                .iter()
                .map(|h| Constraint::Length(*h))
                .chain([Constraint::Min(0)]),
        )
        .split(rows_area);

    for (chunk, index) in chunks.iter().zip(first..=last) {
        match form.get_field(index) {
            Some(spec) => {
                let empty = FieldValue::empty_for(spec.kind);
                let field = FieldDraw {
                    spec,
                    value: form.record().get(&spec.name).unwrap_or(&empty),
                    errors: form.errors().get(&spec.name).unwrap_or(&[]),
                    is_active: form.active_field() == index,
                    option_cursor: form.option_cursor(),
                };
                draw_field(frame, *chunk, &field);
            }
            None => draw_submit_button(frame, *chunk, form),
        }
    }

    if let Some(message) = form.submit_error() {
        let banner_area = Rect {
            y: inner.y + rows_area.height,
            height: banner_height,
            ..inner
        };
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {message} "),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(banner, banner_area);
    }
}

fn draw_submit_button(frame: &mut Frame, area: Rect, form: &dyn Form) {
    let area = Rect {
        width: area.width.min(20),
        ..area
    };
    let label = if form.is_submitting() {
        "Submitting..."
    } else {
        "Submit"
    };
    render_button(
        frame,
        area,
        label,
        form.is_submit_active(),
        !form.is_submitting(),
        Color::Green,
    );
}

/// First and last row index to draw so that `active` stays on screen
fn visible_rows(heights: &[u16], active: usize, available: u16) -> (usize, usize) {
    let last_index = heights.len().saturating_sub(1);
    let active = active.min(last_index);

    // Scroll just far enough that the active row fits
    let mut first = 0;
    let mut used: u16 = heights[..=active].iter().sum();
    while used > available && first < active {
        used -= heights[first];
        first += 1;
    }

    // Fill the rest of the space downward
    let mut last = active;
    while last < last_index && used + heights[last + 1] <= available {
        last += 1;
        used += heights[last];
    }

    (first, last)
}
