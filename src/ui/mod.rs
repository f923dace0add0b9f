//! Top-level UI composition for the demo screen.

use crate::app::state::{DemoState, Focus, build_menu, variant_name};
use crate::ui::components::{button, footer, header};
use log::warn;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub mod components;
mod hints;
pub mod theme;

const FIELD_WIDTH: u16 = 40;
const FIELD_HEIGHT: u16 = 3;

/// Draws the demo screen.
pub fn render(frame: &mut Frame<'_>, state: &mut DemoState) {
    let hints = hints::build(state);

    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(footer::required_height(frame.area().width, &hints)),
    ])
    .split(frame.area());

    header::render(
        frame,
        root[0],
        &header::HeaderModel {
            app_label: "▾ exposed-dropdown".to_owned(),
            status: state.selections.last().cloned(),
            error: state.error_message.clone(),
        },
    );
    footer::render(frame, root[2], &hints);

    let body = root[1].inner(Margin::new(2, 0));
    let column = Rect {
        width: body.width.min(FIELD_WIDTH),
        ..body
    };
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(column);

    let button_rect = Rect {
        width: rows[1].width.min(button::WIDTH),
        ..rows[1]
    };
    state.button_area = button_rect;
    button::render(
        frame,
        button_rect,
        "Focus",
        state.focus == Some(Focus::Button),
    );
    render_selections(frame, rows[7], &state.selections);

    let DemoState {
        items,
        label,
        enabled,
        max_visible_rows,
        slots,
        error_message,
        ..
    } = state;
    let areas = [rows[3], rows[5]];

    // Fields first, popups afterwards so an open popup overlays the sibling field.
    for (slot, area) in slots.iter_mut().zip(areas) {
        build_menu(slot.variant, items, label, *enabled, *max_visible_rows).render_field(
            frame,
            area,
            &mut slot.dropdown,
        );
    }
    for slot in slots.iter_mut() {
        let menu = build_menu(slot.variant, items, label, *enabled, *max_visible_rows);
        if let Err(error) = menu.render_popup(frame, &mut slot.dropdown) {
            warn!("{} menu render: {error}", variant_name(slot.variant));
            *error_message = Some(error.to_string());
        }
    }
}

fn render_selections(frame: &mut Frame<'_>, area: Rect, selections: &[String]) {
    if area.height < 3 {
        return;
    }

    let block = Block::default()
        .title(Line::from(Span::styled(" Selections ", theme::title())))
        .borders(Borders::TOP)
        .border_style(theme::border());

    let lines: Vec<Line<'_>> = if selections.is_empty() {
        vec![Line::from(Span::styled("  nothing selected yet", theme::dim()))]
    } else {
        selections
            .iter()
            .rev()
            .map(|entry| Line::from(Span::styled(format!("  {entry}"), theme::text())))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
