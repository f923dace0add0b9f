//! Footer hint composition for the current focus.

use crate::app::state::{DemoState, Focus};
use crate::dropdown::TOGGLE_DESCRIPTION;

pub fn build(state: &DemoState) -> Vec<(&'static str, &'static str)> {
    match state.focus {
        Some(Focus::Menu(slot)) => menu_hints(state, slot),
        Some(Focus::Button) => vec![
            ("tab", "next"),
            ("enter", "press"),
            ("q", "quit"),
        ],
        None => vec![("tab", "focus"), ("click", "field or toggle"), ("q", "quit")],
    }
}

fn menu_hints(state: &DemoState, slot: usize) -> Vec<(&'static str, &'static str)> {
    let expanded = state
        .slots
        .get(slot)
        .is_some_and(|menu| menu.dropdown.is_expanded());

    let mut hints = vec![("tab", "next"), ("type", "filter"), ("F4", TOGGLE_DESCRIPTION)];
    if expanded {
        hints.push(("up/down", "highlight"));
        hints.push(("enter", "select"));
        hints.push(("esc", "close"));
    }
    hints.push(("C-c", "quit"));
    hints
}
