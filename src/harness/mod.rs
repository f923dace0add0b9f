//! Visual harness for deterministic rendering snapshots and scripted interaction.

use crate::app::input;
use crate::app::state::{DemoState, Focus};
use crate::config::MenuConfig;
use crate::dropdown::DEFAULT_MAX_VISIBLE_ROWS;
use crate::fixtures;
use crate::ui;
use anyhow::{Context, anyhow};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::{Position, Rect};

/// Demo screen driven by synthetic terminal events against an in-memory backend.
pub struct Harness {
    state: DemoState,
    terminal: Terminal<TestBackend>,
}

impl Harness {
    pub fn new(menu: &MenuConfig, width: u16, height: u16) -> anyhow::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .context("failed to create test terminal")?;
        let mut harness = Self {
            state: DemoState::new(menu),
            terminal,
        };
        harness.render()?;
        Ok(harness)
    }

    /// Harness over the fixed `Abb, Abc, A, B, C` item list.
    pub fn with_fixture_items(width: u16, height: u16) -> anyhow::Result<Self> {
        Self::new(
            &MenuConfig {
                label: "Test".to_owned(),
                items: fixtures::harness_items(),
                default_item: String::new(),
                enabled: true,
                max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            },
            width,
            height,
        )
    }

    pub fn state(&self) -> &DemoState {
        &self.state
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let state = &mut self.state;
        self.terminal
            .draw(|frame| ui::render(frame, state))
            .context("failed to render frame")?;
        Ok(())
    }

    /// Left click (press and release) on the center of the element tagged `tag`.
    pub fn click(&mut self, tag: &str) -> anyhow::Result<()> {
        let area = self
            .state
            .region(tag)
            .ok_or_else(|| anyhow!("no element tagged `{tag}` on screen"))?;
        self.click_at(center(area))
    }

    /// Left click on the first popup row labelled `label`.
    pub fn click_row(&mut self, label: &str) -> anyhow::Result<()> {
        let area = self
            .state
            .slots
            .iter()
            .flat_map(|slot| slot.dropdown.layout().rows.iter())
            .find(|row| row.label == label)
            .map(|row| row.area)
            .ok_or_else(|| anyhow!("no popup row labelled `{label}` on screen"))?;
        self.click_at(center(area))
    }

    fn click_at(&mut self, position: Position) -> anyhow::Result<()> {
        self.send(mouse(MouseEventKind::Down(MouseButton::Left), position));
        self.send(mouse(MouseEventKind::Up(MouseButton::Left), position));
        self.render()
    }

    /// Focuses the field tagged `tag` and types `text` into it.
    pub fn type_text(&mut self, tag: &str, text: &str) -> anyhow::Result<()> {
        let slot = self
            .state
            .slots
            .iter()
            .position(|slot| slot.variant.field_tag() == tag)
            .ok_or_else(|| anyhow!("no text field tagged `{tag}`"))?;

        self.state.set_focus(Some(Focus::Menu(slot)));
        for ch in text.chars() {
            self.send(Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
        }
        self.render()
    }

    pub fn press_key(&mut self, code: KeyCode) -> anyhow::Result<()> {
        self.send(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        self.render()
    }

    /// Number of popup rows on screen whose label is exactly `text`.
    pub fn rows_with_text(&self, text: &str) -> usize {
        self.state.visible_rows().filter(|label| *label == text).count()
    }

    /// Plain-text copy of the last rendered frame.
    pub fn screen(&self) -> String {
        buffer_to_string(self.terminal.backend())
    }

    fn send(&mut self, event: Event) {
        input::handle_event(&mut self.state, event);
    }
}

/// Renders the demo screen closed, open, filtered and after a selection.
pub fn render_demo_dump(width: u16, height: u16) -> anyhow::Result<String> {
    let mut harness = Harness::with_fixture_items(width, height)?;
    let closed = harness.screen();

    harness.click("toggle")?;
    let open = harness.screen();

    harness.type_text("edit", "Ab")?;
    let filtered = harness.screen();

    harness.press_key(KeyCode::Down)?;
    harness.press_key(KeyCode::Down)?;
    harness.press_key(KeyCode::Enter)?;
    let selected = harness.screen();

    Ok(format!(
        "=== CLOSED ===\n{closed}\n=== OPEN ===\n{open}\n=== FILTERED ===\n{filtered}\n=== SELECTED ===\n{selected}"
    ))
}

fn center(area: Rect) -> Position {
    Position::new(area.x + area.width / 2, area.y + area.height / 2)
}

fn mouse(kind: MouseEventKind, position: Position) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: position.x,
        row: position.y,
        modifiers: KeyModifiers::NONE,
    })
}

fn buffer_to_string(backend: &TestBackend) -> String {
    let buffer = backend.buffer();
    let area = buffer.area;

    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    out
}
