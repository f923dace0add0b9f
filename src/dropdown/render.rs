//! Drawing of the dropdown field and its anchored popup.

use super::Variant;
use super::state::Target;
use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// Accessible description of the toggle affordance.
pub const TOGGLE_DESCRIPTION: &str = "dropdown";

pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 6;

const GLYPH_CLOSED: &str = "▼";
const GLYPH_OPEN: &str = "▲";
const TOGGLE_WIDTH: u16 = 3;

/// A popup row as drawn by the last render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRegion {
    pub area: Rect,
    /// Position in the filtered view.
    pub row: usize,
    pub label: String,
}

/// Screen regions recorded while rendering, used for pointer hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownLayout {
    pub field: Rect,
    pub toggle: Rect,
    pub popup: Option<Rect>,
    pub rows: Vec<RowRegion>,
    variant: Option<Variant>,
}

impl DropdownLayout {
    /// Resolves a screen position to the dropdown element under it.
    ///
    /// The popup is drawn over everything else, so its rows win.
    pub fn hit_test(&self, position: Position) -> Option<Target> {
        if let Some(region) = self.rows.iter().find(|r| r.area.contains(position)) {
            return Some(Target::Row(region.row));
        }
        if self.toggle.contains(position) {
            return Some(Target::Toggle);
        }
        if self.field.contains(position) {
            return Some(Target::Field);
        }
        None
    }

    /// Whether a position lands on the popup, including its border.
    pub fn popup_contains(&self, position: Position) -> bool {
        self.popup.is_some_and(|popup| popup.contains(position))
    }

    /// Looks up a region by its identification tag (`edit`, `toggle_o`, ...).
    pub fn region(&self, tag: &str) -> Option<Rect> {
        let variant = self.variant?;
        if tag == variant.field_tag() {
            Some(self.field)
        } else if tag == variant.toggle_tag() {
            Some(self.toggle)
        } else {
            None
        }
    }

    /// Labels of the popup rows currently on screen.
    pub fn visible_labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|region| region.label.as_str())
    }
}

pub(super) struct FieldProps<'a, 'b> {
    pub variant: Variant,
    pub enabled: bool,
    pub label: Option<&'b Line<'a>>,
    pub text: &'b str,
    pub focused: bool,
    pub expanded: bool,
}

/// Draws the text field with its label and toggle glyph. Returns `(field, toggle)` regions.
pub(super) fn render_field(frame: &mut Frame<'_>, area: Rect, props: FieldProps<'_, '_>) -> (Rect, Rect) {
    let border_style = if !props.enabled {
        theme::disabled()
    } else if props.focused {
        theme::focused_border()
    } else {
        theme::border()
    };

    let floating_label = props.focused || !props.text.is_empty();
    let mut block = match props.variant {
        Variant::Filled => Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick)
            .style(theme::field()),
        Variant::Outlined => Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    }
    .border_style(border_style);

    if floating_label {
        if let Some(label) = props.label {
            let style = if !props.enabled {
                theme::disabled()
            } else if props.focused {
                theme::focused_border()
            } else {
                theme::label()
            };
            block = block.title(label.clone().style(style));
        }
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let toggle_width = TOGGLE_WIDTH.min(inner.width);
    let text_area = Rect {
        width: inner.width.saturating_sub(toggle_width),
        ..inner
    };
    let glyph_area = Rect {
        x: text_area.right(),
        width: toggle_width,
        ..inner
    };

    let value = field_line(&props, floating_label, usize::from(text_area.width));
    frame.render_widget(Paragraph::new(value), text_area);

    let glyph = if props.expanded { GLYPH_OPEN } else { GLYPH_CLOSED };
    let glyph_style = if props.enabled {
        theme::toggle()
    } else {
        theme::disabled()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {glyph}"), glyph_style))),
        glyph_area,
    );

    let toggle = Rect {
        x: glyph_area.x,
        y: area.y,
        width: glyph_area.width,
        height: area.height,
    };
    (area, toggle)
}

fn field_line(props: &FieldProps<'_, '_>, floating_label: bool, width: usize) -> Line<'static> {
    if !floating_label {
        let placeholder = props
            .label
            .map(line_text)
            .unwrap_or_default();
        let style = if props.enabled {
            theme::dim()
        } else {
            theme::disabled()
        };
        return Line::from(Span::styled(format!(" {placeholder}"), style));
    }

    let mut value = props.text.to_owned();
    if props.focused && props.enabled {
        value.push('|');
    }
    let style = if props.enabled {
        theme::text()
    } else {
        theme::disabled()
    };
    Line::from(Span::styled(format!(" {}", tail(&value, width.saturating_sub(1))), style))
}

/// Keeps the end of `value` visible when it is wider than the field.
fn tail(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len <= width {
        return value.to_owned();
    }
    value.chars().skip(len - width).collect()
}

fn line_text(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

pub(super) struct PopupRow<'a> {
    pub label: String,
    pub line: Line<'a>,
}

pub(super) struct PopupProps<'a> {
    pub anchor: Rect,
    pub rows: Vec<PopupRow<'a>>,
    pub highlighted: Option<usize>,
    pub max_visible_rows: usize,
}

/// Draws the popup anchored to the field. Returns the popup area and row regions.
pub(super) fn render_popup(
    frame: &mut Frame<'_>,
    props: PopupProps<'_>,
    offset: &mut usize,
) -> (Option<Rect>, Vec<RowRegion>) {
    let screen = frame.area();
    let total = props.rows.len();
    let wanted = total.min(props.max_visible_rows.max(1));
    let Some(area) = popup_area(screen, props.anchor, wanted, &props.rows) else {
        return (None, Vec::new());
    };

    let visible = usize::from(area.height.saturating_sub(2)).min(total);
    if visible == 0 {
        return (None, Vec::new());
    }
    *offset = scroll_offset(*offset, props.highlighted, visible, total);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::popup_border());
    let inner = block.inner(area);

    let mut regions = Vec::with_capacity(visible);
    let mut items = Vec::with_capacity(visible);
    for (slot, row) in props.rows.into_iter().skip(*offset).take(visible).enumerate() {
        regions.push(RowRegion {
            area: Rect {
                x: inner.x,
                y: inner.y.saturating_add(clamp_u16(slot)),
                width: inner.width,
                height: 1,
            },
            row: *offset + slot,
            label: row.label,
        });
        items.push(ListItem::new(row.line).style(theme::text()));
    }

    let mut list_state = ListState::default()
        .with_selected(props.highlighted.and_then(|row| row.checked_sub(*offset)));
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);

    (Some(area), regions)
}

fn popup_area(screen: Rect, anchor: Rect, rows: usize, labels: &[PopupRow<'_>]) -> Option<Rect> {
    if rows == 0 || anchor.width == 0 {
        return None;
    }

    let wanted_height = clamp_u16(rows).saturating_add(2);
    let below = screen.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(screen.y);
    let (y, height) = if below >= wanted_height || below >= above {
        (anchor.bottom(), wanted_height.min(below))
    } else {
        let height = wanted_height.min(above);
        (anchor.y - height, height)
    };
    if height < 3 {
        return None;
    }

    let widest = labels
        .iter()
        .map(|row| clamp_u16(row.line.width()).saturating_add(4))
        .max()
        .unwrap_or(0);
    let width = anchor
        .width
        .max(widest)
        .min(screen.right().saturating_sub(anchor.x));

    Some(Rect {
        x: anchor.x,
        y,
        width,
        height,
    })
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn scroll_offset(offset: usize, highlighted: Option<usize>, visible: usize, total: usize) -> usize {
    let mut offset = offset.min(total.saturating_sub(visible));
    if let Some(row) = highlighted {
        if row < offset {
            offset = row;
        } else if row >= offset + visible {
            offset = row + 1 - visible;
        }
    }
    offset
}

pub(super) fn layout(
    variant: Variant,
    field: Rect,
    toggle: Rect,
    popup: Option<Rect>,
    rows: Vec<RowRegion>,
) -> DropdownLayout {
    DropdownLayout {
        field,
        toggle,
        popup,
        rows,
        variant: Some(variant),
    }
}

#[cfg(test)]
mod tests {
    use super::{DropdownLayout, RowRegion, popup_area, scroll_offset, tail};
    use crate::dropdown::{Variant, state::Target};
    use ratatui::layout::{Position, Rect};

    #[test]
    fn popup_height_saturates_for_huge_row_counts() {
        let screen = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(0, 0, 20, 3);
        assert_eq!(
            popup_area(screen, anchor, 70_000, &[]),
            Some(Rect::new(0, 3, 20, 21))
        );
    }

    #[test]
    fn scroll_keeps_highlight_visible() {
        assert_eq!(scroll_offset(0, Some(7), 3, 10), 5);
        assert_eq!(scroll_offset(5, Some(2), 3, 10), 2);
        assert_eq!(scroll_offset(5, Some(6), 3, 10), 5);
        assert_eq!(scroll_offset(9, None, 3, 10), 7);
    }

    #[test]
    fn tail_keeps_end_of_long_text() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
    }

    #[test]
    fn hit_test_prefers_rows_then_toggle() {
        let layout = super::layout(
            Variant::Filled,
            Rect::new(0, 0, 20, 3),
            Rect::new(17, 0, 3, 3),
            Some(Rect::new(0, 3, 20, 4)),
            vec![RowRegion {
                area: Rect::new(1, 4, 18, 1),
                row: 0,
                label: "A".to_owned(),
            }],
        );

        assert_eq!(layout.hit_test(Position::new(2, 4)), Some(Target::Row(0)));
        assert_eq!(layout.hit_test(Position::new(18, 1)), Some(Target::Toggle));
        assert_eq!(layout.hit_test(Position::new(2, 1)), Some(Target::Field));
        assert_eq!(layout.hit_test(Position::new(2, 9)), None);
        assert!(layout.popup_contains(Position::new(0, 3)));
    }

    #[test]
    fn regions_resolve_by_variant_tag() {
        let layout = super::layout(
            Variant::Outlined,
            Rect::new(0, 0, 20, 3),
            Rect::new(17, 0, 3, 3),
            None,
            Vec::new(),
        );
        assert_eq!(layout.region("edit_o"), Some(Rect::new(0, 0, 20, 3)));
        assert_eq!(layout.region("toggle_o"), Some(Rect::new(17, 0, 3, 3)));
        assert_eq!(layout.region("edit"), None);
        assert_eq!(DropdownLayout::default().region("edit"), None);
    }
}
