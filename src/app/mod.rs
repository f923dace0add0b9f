//! Application runtime, event loop, and terminal handling.

pub mod editor;
pub mod input;
pub mod state;

use crate::app::state::DemoState;
use crate::config::MenuConfig;
use crate::ui;
use anyhow::Context;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{Stdout, stdout};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the interactive demo until the user quits.
pub fn run(menu: MenuConfig) -> anyhow::Result<()> {
    let mut state = DemoState::new(&menu);
    info!(
        "starting session with {} items (enabled={})",
        state.items.len(),
        state.enabled
    );

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;

    info!("session ended after {} selections", state.selections.len());
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut DemoState,
) -> anyhow::Result<()> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, state))
            .context("failed to draw frame")?;

        if state.should_quit {
            break;
        }

        if event::poll(POLL_INTERVAL)? {
            input::handle_event(state, event::read()?);
        }
    }

    Ok(())
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(out);
    let terminal = Terminal::new(backend).context("failed to create ratatui terminal")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;

    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
