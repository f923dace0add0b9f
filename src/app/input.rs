//! Translation of terminal key and mouse events into dropdown interactions.

use crate::app::state::{DemoState, Focus};
use crate::dropdown::{Interaction, Target};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

/// Applies one terminal event to the demo state.
pub fn handle_event(state: &mut DemoState, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(state, key),
        Event::Mouse(mouse) => handle_mouse_event(state, mouse),
        Event::FocusLost => state.set_focus(None),
        _ => {}
    }
}

fn handle_key_event(state: &mut DemoState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        state.should_quit = true;
        return;
    }

    if key.code == KeyCode::Tab {
        state.focus_next();
        return;
    }
    if key.code == KeyCode::BackTab {
        state.focus_previous();
        return;
    }

    match state.focus {
        Some(Focus::Menu(slot)) => handle_menu_key_event(state, slot, key),
        Some(Focus::Button) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => state.activate_button(),
            KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
            _ => {}
        },
        None => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                state.should_quit = true;
            }
        }
    }
}

fn handle_menu_key_event(state: &mut DemoState, slot: usize, key: KeyEvent) {
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::F(4) => toggle_gesture(state, slot),
        KeyCode::Down | KeyCode::Up if alt => toggle_gesture(state, slot),
        KeyCode::Down => {
            state.dispatch(slot, Interaction::HighlightNext);
        }
        KeyCode::Up => {
            state.dispatch(slot, Interaction::HighlightPrevious);
        }
        KeyCode::Enter => {
            state.dispatch(slot, Interaction::ConfirmHighlighted);
        }
        KeyCode::Esc => {
            state.dispatch(slot, Interaction::Dismiss);
        }
        KeyCode::Backspace => {
            state.dispatch(slot, Interaction::Backspace);
        }
        KeyCode::Char(ch) if !ch.is_control() && !alt => {
            state.dispatch(slot, Interaction::InsertChar(ch));
        }
        _ => {}
    }
}

fn toggle_gesture(state: &mut DemoState, slot: usize) {
    state.dispatch(slot, Interaction::Press(Target::Toggle));
    state.dispatch(slot, Interaction::Release(Target::Toggle));
}

fn handle_mouse_event(state: &mut DemoState, mouse: MouseEvent) {
    let position = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => pointer_down(state, position),
        MouseEventKind::Up(MouseButton::Left) => pointer_up(state, position),
        _ => {}
    }
}

/// Menu slot and target under `position`. Open popups take precedence over fields.
fn hit(state: &DemoState, position: Position) -> Option<(usize, Option<Target>)> {
    if let Some(slot) = state.popup_at(position) {
        return Some((slot, state.slots[slot].dropdown.layout().hit_test(position)));
    }

    state.slots.iter().enumerate().find_map(|(slot, menu)| {
        menu.dropdown
            .layout()
            .hit_test(position)
            .map(|target| (slot, Some(target)))
    })
}

fn pointer_down(state: &mut DemoState, position: Position) {
    match hit(state, position) {
        Some((slot, target)) => {
            // The popup is not focusable: pressing a row keeps focus in its field.
            if !matches!(target, Some(Target::Row(_))) && state.enabled {
                state.set_focus(Some(Focus::Menu(slot)));
            }
            if let Some(target) = target {
                state.dispatch(slot, Interaction::Press(target));
            }
        }
        None if state.button_area.contains(position) => state.press_button(),
        None => state.set_focus(None),
    }
}

fn pointer_up(state: &mut DemoState, position: Position) {
    let over_button = state.button_area.contains(position);
    let released = hit(state, position);

    for slot in 0..state.slots.len() {
        let interaction = match released {
            Some((hit_slot, Some(target))) if hit_slot == slot => Interaction::Release(target),
            _ => Interaction::CancelPress,
        };
        state.dispatch(slot, interaction);
    }

    state.release_button(released.is_none() && over_button);
}

#[cfg(test)]
mod tests {
    use super::handle_event;
    use crate::app::state::{DemoState, Focus};
    use crate::config::MenuConfig;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn state() -> DemoState {
        DemoState::new(&MenuConfig {
            label: "Test".to_owned(),
            items: vec!["Abb".to_owned(), "Abc".to_owned(), "A".to_owned()],
            default_item: String::new(),
            enabled: true,
            max_visible_rows: 6,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn keyboard_drives_the_focused_menu() {
        let mut state = state();
        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, Some(Focus::Button));
        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, Some(Focus::Menu(0)));

        handle_event(&mut state, key(KeyCode::Char('b')));
        assert_eq!(state.slots[0].dropdown.text(), "b");
        assert!(!state.slots[0].dropdown.is_expanded());

        handle_event(&mut state, key(KeyCode::F(4)));
        assert!(state.slots[0].dropdown.is_expanded());

        handle_event(&mut state, key(KeyCode::Down));
        handle_event(&mut state, key(KeyCode::Down));
        handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(state.slots[0].dropdown.text(), "Abc");
        assert_eq!(state.selections, vec!["filled #1: Abc"]);
    }

    #[test]
    fn alt_down_toggles_and_escape_dismisses() {
        let mut state = state();
        state.set_focus(Some(Focus::Menu(1)));
        handle_event(
            &mut state,
            Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::ALT)),
        );
        assert!(state.slots[1].dropdown.is_expanded());
        handle_event(&mut state, key(KeyCode::Esc));
        assert!(!state.slots[1].dropdown.is_expanded());
        assert!(!state.should_quit);
    }

    #[test]
    fn quit_keys() {
        let mut state = state();
        state.set_focus(Some(Focus::Menu(0)));
        handle_event(&mut state, key(KeyCode::Char('q')));
        assert!(!state.should_quit);
        assert_eq!(state.slots[0].dropdown.text(), "q");

        handle_event(
            &mut state,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(state.should_quit);
    }
}
