//! Shared styles for the dropdown and the demo screen.

use ratatui::style::{Color, Modifier, Style};
use std::sync::{OnceLock, RwLock};

/// Runtime theme palette used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub border: Color,
    pub focused_border: Color,
    pub title: Color,
    pub label: Color,
    pub text: Color,
    pub dim: Color,
    pub disabled: Color,
    pub toggle: Color,
    pub field_bg: Color,
    pub popup_border: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub info: Color,
    pub error: Color,
    pub hint_key: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            border: Color::Rgb(120, 120, 130),
            focused_border: Color::Rgb(103, 80, 164),
            title: Color::Rgb(208, 188, 255),
            label: Color::Rgb(170, 170, 180),
            text: Color::Rgb(230, 225, 229),
            dim: Color::DarkGray,
            disabled: Color::Rgb(90, 90, 96),
            toggle: Color::Rgb(202, 196, 208),
            field_bg: Color::Rgb(36, 34, 42),
            popup_border: Color::Rgb(147, 143, 153),
            selected_fg: Color::Black,
            selected_bg: Color::Rgb(208, 188, 255),
            info: Color::Cyan,
            error: Color::Red,
            hint_key: Color::Yellow,
        }
    }
}

static ACTIVE_THEME: OnceLock<RwLock<ThemePalette>> = OnceLock::new();

fn store() -> &'static RwLock<ThemePalette> {
    ACTIVE_THEME.get_or_init(|| RwLock::new(ThemePalette::default()))
}

fn with_palette<T>(f: impl FnOnce(&ThemePalette) -> T) -> T {
    match store().read() {
        Ok(guard) => f(&guard),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Installs the active runtime theme palette.
pub fn apply(palette: ThemePalette) {
    if let Ok(mut guard) = store().write() {
        *guard = palette;
    }
}

pub fn border() -> Style {
    with_palette(|theme| Style::default().fg(theme.border))
}

pub fn focused_border() -> Style {
    with_palette(|theme| Style::default().fg(theme.focused_border))
}

pub fn title() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn label() -> Style {
    with_palette(|theme| Style::default().fg(theme.label))
}

pub fn text() -> Style {
    with_palette(|theme| Style::default().fg(theme.text))
}

pub fn dim() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn disabled() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.disabled)
            .add_modifier(Modifier::DIM)
    })
}

pub fn toggle() -> Style {
    with_palette(|theme| Style::default().fg(theme.toggle))
}

/// Background of the filled field variant.
pub fn field() -> Style {
    with_palette(|theme| Style::default().bg(theme.field_bg))
}

pub fn popup_border() -> Style {
    with_palette(|theme| Style::default().fg(theme.popup_border))
}

pub fn selected() -> Style {
    with_palette(|theme| Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
}

pub fn info() -> Style {
    with_palette(|theme| Style::default().fg(theme.info))
}

pub fn error() -> Style {
    with_palette(|theme| Style::default().fg(theme.error))
}

pub fn hint_key() -> Style {
    with_palette(|theme| Style::default().fg(theme.hint_key))
}
