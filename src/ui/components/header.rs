//! Header component with the app title and the latest status line.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header payload consumed by the renderer.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub app_label: String,
    pub status: Option<String>,
    pub error: Option<String>,
}

/// Renders the screen header. Errors take precedence over the status line.
pub fn render(frame: &mut Frame<'_>, area: Rect, model: &HeaderModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    let mut spans = vec![Span::styled(format!(" {}", model.app_label), theme::title())];
    if let Some(error) = &model.error {
        spans.push(Span::styled(format!("  error: {error}"), theme::error()));
    } else if let Some(status) = &model.status {
        spans.push(Span::styled(format!("  selected {status}"), theme::info()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
