//! Demo screen state: two dropdowns and a focus button.

use crate::config::MenuConfig;
use crate::dropdown::{
    DropdownState, ExposedDropdownMenu, Interaction, Outcome, Variant, exposed_dropdown_menu,
    outlined_exposed_dropdown_menu,
};
use log::{debug, warn};
use ratatui::layout::{Position, Rect};
use ratatui::text::Line;

/// Identification tag of the focus button.
pub const FOCUS_BUTTON_TAG: &str = "focus";

const SELECTION_HISTORY: usize = 8;

/// Element of the demo screen that owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu(usize),
    Button,
}

const FOCUS_ORDER: [Focus; 3] = [Focus::Button, Focus::Menu(0), Focus::Menu(1)];

/// One mounted dropdown.
#[derive(Debug, Clone)]
pub struct MenuSlot {
    pub variant: Variant,
    pub dropdown: DropdownState,
}

/// Top-level mutable demo state.
#[derive(Debug, Clone)]
pub struct DemoState {
    pub items: Vec<String>,
    pub label: String,
    pub enabled: bool,
    pub max_visible_rows: usize,
    pub slots: [MenuSlot; 2],
    pub focus: Option<Focus>,
    pub selections: Vec<String>,
    pub error_message: Option<String>,
    pub button_area: Rect,
    pub button_presses: usize,
    pub should_quit: bool,
    button_pressed: bool,
}

impl DemoState {
    pub fn new(config: &MenuConfig) -> Self {
        let slot = |variant| MenuSlot {
            variant,
            dropdown: DropdownState::new(config.default_item.clone()),
        };

        Self {
            items: config.items.clone(),
            label: config.label.clone(),
            enabled: config.enabled,
            max_visible_rows: config.max_visible_rows,
            slots: [slot(Variant::Filled), slot(Variant::Outlined)],
            focus: None,
            selections: Vec::new(),
            error_message: None,
            button_area: Rect::default(),
            button_presses: 0,
            should_quit: false,
            button_pressed: false,
        }
    }

    /// Routes one interaction to the dropdown in `slot`.
    pub fn dispatch(&mut self, slot: usize, interaction: Interaction) -> Outcome {
        let Self {
            items,
            label,
            enabled,
            max_visible_rows,
            slots,
            selections,
            error_message,
            ..
        } = self;
        let Some(menu_slot) = slots.get_mut(slot) else {
            return Outcome::Unchanged;
        };

        let variant = menu_slot.variant;
        let mut menu = build_menu(variant, items, label, *enabled, *max_visible_rows).on_select(
            |index, item: &String| {
                selections.push(format!("{} #{index}: {item}", variant_name(variant)));
                if selections.len() > SELECTION_HISTORY {
                    selections.remove(0);
                }
            },
        );

        match menu.handle(&mut menu_slot.dropdown, interaction) {
            Ok(outcome) => {
                if outcome != Outcome::Unchanged {
                    debug!("{} menu: {outcome:?}", variant_name(variant));
                }
                *error_message = None;
                outcome
            }
            Err(error) => {
                warn!("{} menu: {error}", variant_name(variant));
                *error_message = Some(error.to_string());
                Outcome::Unchanged
            }
        }
    }

    /// Moves keyboard focus, delivering blur/focus to the affected dropdowns.
    pub fn set_focus(&mut self, focus: Option<Focus>) {
        if self.focus == focus {
            return;
        }

        if let Some(Focus::Menu(slot)) = self.focus {
            self.dispatch(slot, Interaction::FocusLost);
        }
        self.focus = focus;
        if let Some(Focus::Menu(slot)) = focus {
            if self.enabled {
                self.dispatch(slot, Interaction::FocusGained);
            } else {
                // Disabled dropdowns cannot hold focus.
                self.focus = None;
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(true);
    }

    pub fn focus_previous(&mut self) {
        self.cycle_focus(false);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let candidates: Vec<Focus> = FOCUS_ORDER
            .into_iter()
            .filter(|focus| self.enabled || *focus == Focus::Button)
            .collect();
        let position = self
            .focus
            .and_then(|current| candidates.iter().position(|focus| *focus == current));
        let len = candidates.len();
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
        };
        self.set_focus(candidates.get(next).copied());
    }

    pub fn focused_menu(&self) -> Option<usize> {
        match self.focus {
            Some(Focus::Menu(slot)) => Some(slot),
            _ => None,
        }
    }

    /// Records a press on the focus button; it fires on the matching release.
    pub fn press_button(&mut self) {
        self.set_focus(Some(Focus::Button));
        self.button_pressed = true;
    }

    pub fn release_button(&mut self, over_button: bool) {
        if std::mem::take(&mut self.button_pressed) && over_button {
            self.activate_button();
        }
    }

    pub fn activate_button(&mut self) {
        self.button_presses += 1;
        debug!("focus button activated ({})", self.button_presses);
    }

    /// Screen region of a tagged element from the last render.
    pub fn region(&self, tag: &str) -> Option<Rect> {
        if tag == FOCUS_BUTTON_TAG {
            return Some(self.button_area);
        }
        self.slots
            .iter()
            .find_map(|slot| slot.dropdown.layout().region(tag))
    }

    /// Slot whose popup covers `position`, checked before fields since popups overlay them.
    pub fn popup_at(&self, position: Position) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.dropdown.layout().popup_contains(position))
    }

    /// Labels of every popup row currently on screen, across all dropdowns.
    pub fn visible_rows(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .flat_map(|slot| slot.dropdown.layout().visible_labels())
    }
}

/// Builds the dropdown for `variant` over the demo items.
pub fn build_menu<'a>(
    variant: Variant,
    items: &'a [String],
    label: &'a str,
    enabled: bool,
    max_visible_rows: usize,
) -> ExposedDropdownMenu<'a, String> {
    let menu = match variant {
        Variant::Filled => exposed_dropdown_menu(items),
        Variant::Outlined => outlined_exposed_dropdown_menu(items),
    };
    menu.enabled(enabled)
        .label(Line::from(format!(" {label} ")))
        .max_visible_rows(max_visible_rows)
        .content(|text, _| Line::from(format!(" {text}")))
}

pub fn variant_name(variant: Variant) -> &'static str {
    match variant {
        Variant::Filled => "filled",
        Variant::Outlined => "outlined",
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoState, Focus};
    use crate::config::MenuConfig;
    use crate::dropdown::{Interaction, Outcome, Target};

    fn config(enabled: bool) -> MenuConfig {
        MenuConfig {
            label: "Test".to_owned(),
            items: vec!["Abb".to_owned(), "Abc".to_owned(), "A".to_owned()],
            default_item: String::new(),
            enabled,
            max_visible_rows: 6,
        }
    }

    fn toggle(state: &mut DemoState, slot: usize) -> Outcome {
        state.dispatch(slot, Interaction::Press(Target::Toggle));
        state.dispatch(slot, Interaction::Release(Target::Toggle))
    }

    #[test]
    fn focus_change_blurs_previous_menu() {
        let mut state = DemoState::new(&config(true));
        state.set_focus(Some(Focus::Menu(0)));
        assert_eq!(toggle(&mut state, 0), Outcome::Opened);

        state.set_focus(Some(Focus::Button));
        assert!(!state.slots[0].dropdown.is_expanded());
        assert!(!state.slots[0].dropdown.is_focused());
    }

    #[test]
    fn focus_cycles_through_menus_and_button() {
        let mut state = DemoState::new(&config(true));
        state.focus_next();
        assert_eq!(state.focus, Some(Focus::Button));
        state.focus_next();
        assert_eq!(state.focus, Some(Focus::Menu(0)));
        state.focus_next();
        assert_eq!(state.focus, Some(Focus::Menu(1)));
        assert!(!state.slots[0].dropdown.is_focused());
        assert!(state.slots[1].dropdown.is_focused());
        state.focus_next();
        assert_eq!(state.focus, Some(Focus::Button));
        state.focus_previous();
        assert_eq!(state.focus, Some(Focus::Menu(1)));
    }

    #[test]
    fn disabled_menus_are_skipped_by_focus() {
        let mut state = DemoState::new(&config(false));
        state.focus_next();
        assert_eq!(state.focus, Some(Focus::Button));
        state.focus_next();
        assert_eq!(state.focus, Some(Focus::Button));
        state.set_focus(Some(Focus::Menu(0)));
        assert_eq!(state.focus, None);
        assert!(!state.slots[0].dropdown.is_focused());
    }

    #[test]
    fn selection_is_recorded() {
        let mut state = DemoState::new(&config(true));
        toggle(&mut state, 1);
        state.dispatch(1, Interaction::Press(Target::Row(1)));
        let outcome = state.dispatch(1, Interaction::Release(Target::Row(1)));

        assert_eq!(outcome, Outcome::Selected { row: 1, index: 1 });
        assert_eq!(state.selections, vec!["outlined #1: Abc"]);
        assert_eq!(state.slots[1].dropdown.text(), "Abc");
        assert_eq!(state.slots[0].dropdown.text(), "");
    }

    #[test]
    fn button_fires_on_matching_release() {
        let mut state = DemoState::new(&config(true));
        state.press_button();
        state.release_button(false);
        assert_eq!(state.button_presses, 0);
        state.press_button();
        state.release_button(true);
        assert_eq!(state.button_presses, 1);
        assert_eq!(state.focus, Some(Focus::Button));
    }
}
