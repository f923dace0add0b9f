//! Footer component used for keybinding hints.

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const SEPARATOR: &str = "  ";

/// Returns the footer height required to render all hint tokens for the given terminal width.
pub fn required_height(screen_width: u16, hints: &[(&str, &str)]) -> u16 {
    wrap(hints, usize::from(screen_width.max(1))).len().max(1) as u16
}

/// Renders `(key, description)` hints in a plain bottom bar, wrapping between tokens.
pub fn render(frame: &mut Frame<'_>, area: Rect, hints: &[(&str, &str)]) {
    let lines: Vec<Line<'static>> = wrap(hints, usize::from(area.width.max(1)))
        .into_iter()
        .map(|tokens| styled_line(&tokens))
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn token_width((key, desc): (&str, &str)) -> usize {
    let key = key.chars().count() + 2;
    let desc = desc.chars().count();
    if desc == 0 { key } else { key + 1 + desc }
}

fn wrap<'a>(hints: &[(&'a str, &'a str)], width: usize) -> Vec<Vec<(&'a str, &'a str)>> {
    let mut lines: Vec<Vec<(&str, &str)>> = Vec::new();
    let mut used = 0usize;

    for &token in hints {
        let needed = token_width(token);
        let fits = !lines.is_empty() && used + SEPARATOR.len() + needed <= width;
        if fits && let Some(line) = lines.last_mut() {
            line.push(token);
            used += SEPARATOR.len() + needed;
        } else {
            lines.push(vec![token]);
            used = needed.min(width);
        }
    }

    lines
}

fn styled_line(tokens: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (index, (key, desc)) in tokens.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, theme::dim()));
        }
        spans.push(Span::styled(format!("[{key}]"), theme::hint_key()));
        if !desc.is_empty() {
            spans.push(Span::styled(format!(" {desc}"), theme::dim()));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{required_height, wrap};

    const HINTS: [(&str, &str); 3] = [("tab", "focus"), ("F4", "dropdown"), ("esc", "close")];

    #[test]
    fn wide_screen_fits_on_one_line() {
        assert_eq!(required_height(80, &HINTS), 1);
    }

    #[test]
    fn narrow_screen_wraps_between_tokens() {
        let lines = wrap(&HINTS, 16);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], vec![("F4", "dropdown")]);
    }

    #[test]
    fn empty_hints_still_take_one_row() {
        assert_eq!(required_height(80, &[]), 1);
    }
}
