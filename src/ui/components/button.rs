//! Plain push button used to move focus away from the dropdowns.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub const WIDTH: u16 = 12;

pub fn render(frame: &mut Frame<'_>, area: Rect, label: &str, focused: bool) {
    let (border, text) = if focused {
        (theme::focused_border(), theme::selected())
    } else {
        (theme::border(), theme::text())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let line = Line::from(Span::styled(format!(" {label} "), text));

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
