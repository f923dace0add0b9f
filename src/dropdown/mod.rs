//! Exposed dropdown menu: a text field bound to a filterable popup list.
//!
//! The widget is rebuilt by the host every frame from a borrowed item slice and
//! a set of callbacks, the same way ratatui widgets are. All persistent state
//! lives in [`DropdownState`], which the host keeps for as long as the dropdown
//! is mounted.
//!
//! ```ignore
//! let fruits = ["Apple", "Banana", "Cherry"];
//! let mut state = DropdownState::new("");
//!
//! let mut menu = exposed_dropdown_menu(&fruits)
//!     .label(Line::from("Fruit"))
//!     .on_select(|index, fruit| println!("picked #{index}: {fruit}"));
//!
//! menu.handle(&mut state, Interaction::InsertChar('a'))?;
//! menu.render(frame, area, &mut state)?;
//! ```

pub mod filter;
pub mod render;
pub mod state;

pub use filter::{FilterError, FilterFn, FilteredView, default_pattern, derive_view};
pub use render::{DEFAULT_MAX_VISIBLE_ROWS, DropdownLayout, RowRegion, TOGGLE_DESCRIPTION};
pub use state::{DropdownState, Interaction, Target, Transition};

use log::info;
use ratatui::{Frame, layout::Rect, text::Line};
use regex::Regex;
use render::{FieldProps, PopupProps, PopupRow};

/// Field chrome of a dropdown. Behaviour is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Filled,
    Outlined,
}

impl Variant {
    /// Identification tag of the text field.
    pub fn field_tag(self) -> &'static str {
        match self {
            Self::Filled => "edit",
            Self::Outlined => "edit_o",
        }
    }

    /// Identification tag of the toggle affordance.
    pub fn toggle_tag(self) -> &'static str {
        match self {
            Self::Filled => "toggle",
            Self::Outlined => "toggle_o",
        }
    }
}

/// What handling an [`Interaction`] did, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Focused,
    Opened,
    Closed,
    Edited,
    Highlighted,
    /// `on_select` has run and the field now shows the item label.
    Selected { row: usize, index: usize },
}

type LabelFn<'a, T> = dyn Fn(&T) -> String + 'a;
type SelectFn<'a, T> = dyn FnMut(usize, &T) + 'a;
type ContentFn<'a, T> = dyn Fn(&str, &T) -> Line<'a> + 'a;

/// Filled exposed dropdown menu over `items`.
pub fn exposed_dropdown_menu<'a, T: ToString>(items: &'a [T]) -> ExposedDropdownMenu<'a, T> {
    ExposedDropdownMenu::new(Variant::Filled, items)
}

/// Outlined exposed dropdown menu over `items`.
pub fn outlined_exposed_dropdown_menu<'a, T: ToString>(
    items: &'a [T],
) -> ExposedDropdownMenu<'a, T> {
    ExposedDropdownMenu::new(Variant::Outlined, items)
}

/// Combo box pairing a text field with a popup of matching items.
pub struct ExposedDropdownMenu<'a, T> {
    variant: Variant,
    items: &'a [T],
    enabled: bool,
    label: Option<Line<'a>>,
    to_label: Box<LabelFn<'a, T>>,
    filter: Option<Box<FilterFn<'a>>>,
    on_select: Box<SelectFn<'a, T>>,
    content: Box<ContentFn<'a, T>>,
    max_visible_rows: usize,
}

impl<'a, T: ToString> ExposedDropdownMenu<'a, T> {
    /// Creates a dropdown that labels items with [`ToString`].
    pub fn new(variant: Variant, items: &'a [T]) -> Self {
        Self::with_to_label(variant, items, T::to_string)
    }
}

impl<'a, T> ExposedDropdownMenu<'a, T> {
    /// Creates a dropdown for item types without a natural string form.
    pub fn with_to_label(
        variant: Variant,
        items: &'a [T],
        to_label: impl Fn(&T) -> String + 'a,
    ) -> Self {
        Self {
            variant,
            items,
            enabled: true,
            label: None,
            to_label: Box::new(to_label),
            filter: None,
            on_select: Box::new(|_: usize, _: &T| {}),
            content: Box::new(|label: &str, _: &T| Line::from(label.to_owned())),
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
        }
    }

    /// When `false` the dropdown ignores focus, typing, toggling and selection.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn label(mut self, label: impl Into<Line<'a>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn to_label(mut self, to_label: impl Fn(&T) -> String + 'a) -> Self {
        self.to_label = Box::new(to_label);
        self
    }

    /// Replaces the default subsequence pattern used while typing.
    pub fn filter(mut self, filter: impl Fn(&str) -> Result<Regex, regex::Error> + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Called with the item's index in `items` each time the user picks a row.
    ///
    /// The index addresses the full item slice, not the row of the filtered
    /// popup; the filtered row is reported by [`Outcome::Selected`].
    pub fn on_select(mut self, on_select: impl FnMut(usize, &T) + 'a) -> Self {
        self.on_select = Box::new(on_select);
        self
    }

    /// Renders one popup row from the item label and the item itself.
    pub fn content(mut self, content: impl Fn(&str, &T) -> Line<'a> + 'a) -> Self {
        self.content = Box::new(content);
        self
    }

    pub fn max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn toggle_description(&self) -> &'static str {
        TOGGLE_DESCRIPTION
    }

    /// Derives the items eligible for the popup from the current text.
    pub fn view(&self, state: &DropdownState) -> Result<FilteredView, FilterError> {
        derive_view(
            self.items,
            state.text(),
            self.to_label.as_ref(),
            self.filter.as_deref(),
        )
    }

    /// Applies one interaction, running `on_select` when a row is picked.
    pub fn handle(
        &mut self,
        state: &mut DropdownState,
        interaction: Interaction,
    ) -> Result<Outcome, FilterError> {
        // Only row-indexed interactions derive the view; edits, blur and dismiss
        // still apply while the filter rejects the text.
        let view = if interaction.needs_view() {
            Some(self.view(state)?)
        } else {
            None
        };
        let rows = view.as_ref().map_or(0, FilteredView::len);

        let outcome = match state.apply(interaction, self.enabled, rows) {
            Transition::Ignored | Transition::Pending => Outcome::Unchanged,
            Transition::Focused => Outcome::Focused,
            Transition::Opened => Outcome::Opened,
            Transition::Closed => Outcome::Closed,
            Transition::Edited => Outcome::Edited,
            Transition::Highlighted => Outcome::Highlighted,
            Transition::Select(row) => {
                let items = self.items;
                let Some((index, item)) = view
                    .as_ref()
                    .and_then(|view| view.source_index(row))
                    .and_then(|index| items.get(index).map(|item| (index, item)))
                else {
                    return Ok(Outcome::Closed);
                };

                (self.on_select)(index, item);
                let label = (self.to_label)(item);
                info!("dropdown selected #{index} {label:?}");
                state.set_text(label);
                Outcome::Selected { row, index }
            }
        };

        Ok(outcome)
    }

    /// Draws the field and, when open, its popup.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        state: &mut DropdownState,
    ) -> Result<(), FilterError> {
        self.render_field(frame, area, state);
        self.render_popup(frame, state)
    }

    /// Draws only the field. Hosts stacking several dropdowns draw all fields
    /// first, then call [`Self::render_popup`] so popups overlay siblings.
    pub fn render_field(&self, frame: &mut Frame<'_>, area: Rect, state: &mut DropdownState) {
        let (field, toggle) = render::render_field(
            frame,
            area,
            FieldProps {
                variant: self.variant,
                enabled: self.enabled,
                label: self.label.as_ref(),
                text: state.text(),
                focused: state.is_focused(),
                expanded: state.is_expanded(),
            },
        );
        state.layout = render::layout(self.variant, field, toggle, None, Vec::new());
    }

    /// Draws the popup over whatever is below the field recorded by [`Self::render_field`].
    pub fn render_popup(
        &self,
        frame: &mut Frame<'_>,
        state: &mut DropdownState,
    ) -> Result<(), FilterError> {
        state.layout.popup = None;
        state.layout.rows.clear();

        if !state.is_expanded() {
            return Ok(());
        }

        let view = self.view(state)?;
        if view.is_empty() {
            return Ok(());
        }

        let rows = view
            .iter(self.items)
            .map(|(_, item)| {
                let label = (self.to_label)(item);
                let line = (self.content)(&label, item);
                PopupRow { label, line }
            })
            .collect();

        let anchor = state.layout.field;
        let (popup, regions) = render::render_popup(
            frame,
            PopupProps {
                anchor,
                rows,
                highlighted: state.highlighted(),
                max_visible_rows: self.max_visible_rows,
            },
            &mut state.offset,
        );
        state.layout.popup = popup;
        state.layout.rows = regions;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DropdownState, ExposedDropdownMenu, Interaction, Outcome, Target, Variant,
        exposed_dropdown_menu, outlined_exposed_dropdown_menu,
    };
    use ratatui::{Terminal, backend::TestBackend, layout::Rect, text::Line};
    use std::cell::RefCell;

    const ITEMS: [&str; 5] = ["Abb", "Abc", "A", "B", "C"];

    #[derive(Debug, Clone, PartialEq)]
    struct Country {
        code: &'static str,
        name: &'static str,
    }

    fn click<T>(menu: &mut ExposedDropdownMenu<'_, T>, state: &mut DropdownState, target: Target) -> Outcome {
        menu.handle(state, Interaction::Press(target)).unwrap();
        menu.handle(state, Interaction::Release(target)).unwrap()
    }

    fn draw<T>(menu: &ExposedDropdownMenu<'_, T>, state: &mut DropdownState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
        terminal
            .draw(|frame| menu.render(frame, Rect::new(0, 0, 24, 3), state).unwrap())
            .unwrap();
        state.layout().visible_labels().map(str::to_owned).collect()
    }

    #[test]
    fn variants_share_behaviour_and_differ_in_tags() {
        let filled = exposed_dropdown_menu(&ITEMS);
        let outlined = outlined_exposed_dropdown_menu(&ITEMS);
        assert_eq!(filled.variant(), Variant::Filled);
        assert_eq!(outlined.variant(), Variant::Outlined);
        assert_eq!(Variant::Filled.field_tag(), "edit");
        assert_eq!(Variant::Filled.toggle_tag(), "toggle");
        assert_eq!(Variant::Outlined.field_tag(), "edit_o");
        assert_eq!(Variant::Outlined.toggle_tag(), "toggle_o");
        assert_eq!(filled.toggle_description(), "dropdown");
    }

    #[test]
    fn selecting_a_row_reports_source_index_and_updates_text() {
        let selected = RefCell::new(Vec::new());
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS)
            .on_select(|index, item: &&str| selected.borrow_mut().push((index, *item)));

        menu.handle(&mut state, Interaction::InsertChar('c')).unwrap();
        assert_eq!(click(&mut menu, &mut state, Target::Toggle), Outcome::Opened);

        // View for "c" is ["Abc", "C"], so row 1 is items[4].
        assert_eq!(
            click(&mut menu, &mut state, Target::Row(1)),
            Outcome::Selected { row: 1, index: 4 }
        );
        drop(menu);

        assert_eq!(selected.into_inner(), vec![(4, "C")]);
        assert_eq!(state.text(), "C");
        assert!(!state.is_expanded());
    }

    #[test]
    fn blur_never_selects() {
        let calls = RefCell::new(0);
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS).on_select(|_, _| *calls.borrow_mut() += 1);

        click(&mut menu, &mut state, Target::Toggle);
        assert_eq!(
            menu.handle(&mut state, Interaction::FocusLost).unwrap(),
            Outcome::Closed
        );
        drop(menu);
        assert_eq!(calls.into_inner(), 0);
    }

    #[test]
    fn disabled_menu_is_inert() {
        let calls = RefCell::new(0);
        let mut state = DropdownState::new("A");
        let mut menu = exposed_dropdown_menu(&ITEMS)
            .enabled(false)
            .on_select(|_, _| *calls.borrow_mut() += 1);

        assert_eq!(click(&mut menu, &mut state, Target::Toggle), Outcome::Unchanged);
        assert_eq!(
            menu.handle(&mut state, Interaction::FocusGained).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(
            menu.handle(&mut state, Interaction::InsertChar('x')).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(click(&mut menu, &mut state, Target::Row(0)), Outcome::Unchanged);
        drop(menu);

        assert_eq!(state.text(), "A");
        assert!(!state.is_expanded());
        assert_eq!(calls.into_inner(), 0);
    }

    #[test]
    fn popup_renders_each_view_row_once() {
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS).label("Test");

        assert!(draw(&menu, &mut state).is_empty());

        click(&mut menu, &mut state, Target::Toggle);
        assert_eq!(draw(&menu, &mut state), ITEMS.to_vec());

        click(&mut menu, &mut state, Target::Toggle);
        assert!(draw(&menu, &mut state).is_empty());
    }

    #[test]
    fn popup_follows_typed_text() {
        let mut state = DropdownState::default();
        let mut menu = outlined_exposed_dropdown_menu(&ITEMS);

        click(&mut menu, &mut state, Target::Toggle);
        menu.handle(&mut state, Interaction::InsertChar('A')).unwrap();
        assert_eq!(draw(&menu, &mut state), vec!["Abb", "Abc", "A"]);

        menu.handle(&mut state, Interaction::InsertChar('b')).unwrap();
        assert_eq!(draw(&menu, &mut state), vec!["Abb", "Abc"]);

        menu.handle(&mut state, Interaction::InsertChar('D')).unwrap();
        assert!(draw(&menu, &mut state).is_empty());
        assert!(state.is_expanded());
        assert!(state.layout().popup.is_none());
    }

    #[test]
    fn closed_popup_ignores_typing() {
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS);

        menu.handle(&mut state, Interaction::InsertChar('A')).unwrap();
        assert!(draw(&menu, &mut state).is_empty());
        assert_eq!(menu.view(&state).unwrap().len(), 3);
    }

    #[test]
    fn rendered_rows_are_hit_testable() {
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS);

        click(&mut menu, &mut state, Target::Toggle);
        draw(&menu, &mut state);

        let third = state.layout().rows[2].area;
        let target = state.layout().hit_test(third.as_position()).unwrap();
        assert_eq!(target, Target::Row(2));
        assert_eq!(
            click(&mut menu, &mut state, target),
            Outcome::Selected { row: 2, index: 2 }
        );
        assert_eq!(state.text(), "A");
    }

    #[test]
    fn popup_scrolls_to_highlight() {
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS).max_visible_rows(2);

        click(&mut menu, &mut state, Target::Toggle);
        assert_eq!(draw(&menu, &mut state), vec!["Abb", "Abc"]);

        for _ in 0..3 {
            menu.handle(&mut state, Interaction::HighlightNext).unwrap();
        }
        assert_eq!(draw(&menu, &mut state), vec!["Abc", "A"]);
        assert_eq!(
            menu.handle(&mut state, Interaction::ConfirmHighlighted).unwrap(),
            Outcome::Selected { row: 2, index: 2 }
        );
    }

    #[test]
    fn custom_projection_and_content() {
        let countries = [
            Country { code: "at", name: "Austria" },
            Country { code: "de", name: "Germany" },
            Country { code: "dk", name: "Denmark" },
        ];
        let mut state = DropdownState::new("");
        let mut menu = ExposedDropdownMenu::with_to_label(Variant::Filled, &countries, |c: &Country| {
            c.name.to_owned()
        })
        .content(|label, country| Line::from(format!("{} ({})", label, country.code)));

        menu.handle(&mut state, Interaction::SetText("de".to_owned())).unwrap();
        click(&mut menu, &mut state, Target::Toggle);
        assert_eq!(draw(&menu, &mut state), vec!["Denmark"]);

        let row = click(&mut menu, &mut state, Target::Row(0));
        assert_eq!(row, Outcome::Selected { row: 0, index: 2 });
        assert_eq!(state.text(), "Denmark");
    }

    #[test]
    fn default_item_matching_a_label_shows_full_list() {
        let mut state = DropdownState::new("B");
        let mut menu = exposed_dropdown_menu(&ITEMS);
        click(&mut menu, &mut state, Target::Field);
        assert_eq!(draw(&menu, &mut state), ITEMS.to_vec());
    }

    #[test]
    fn rejected_query_can_be_edited_away_and_closed() {
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&ITEMS).filter(regex::Regex::new);

        assert_eq!(click(&mut menu, &mut state, Target::Toggle), Outcome::Opened);
        assert_eq!(
            menu.handle(&mut state, Interaction::InsertChar('(')).unwrap(),
            Outcome::Edited
        );
        assert!(menu.view(&state).is_err());
        assert!(menu.handle(&mut state, Interaction::HighlightNext).is_err());
        assert!(menu.handle(&mut state, Interaction::ConfirmHighlighted).is_err());

        assert_eq!(
            menu.handle(&mut state, Interaction::Backspace).unwrap(),
            Outcome::Edited
        );
        assert_eq!(state.text(), "");
        assert_eq!(draw(&menu, &mut state), ITEMS.to_vec());

        menu.handle(&mut state, Interaction::SetText("a(".to_owned()))
            .unwrap();
        assert_eq!(state.text(), "a(");
        assert_eq!(
            menu.handle(&mut state, Interaction::FocusLost).unwrap(),
            Outcome::Closed
        );
        assert!(!state.is_expanded());
        assert!(!state.is_focused());
    }

    #[test]
    fn oversized_label_is_clipped_to_the_screen() {
        let items = ["x".repeat(65_532)];
        let mut state = DropdownState::default();
        let mut menu = exposed_dropdown_menu(&items).max_visible_rows(usize::MAX);

        click(&mut menu, &mut state, Target::Toggle);
        assert_eq!(draw(&menu, &mut state).len(), 1);
        assert_eq!(state.layout().popup.map(|popup| popup.width), Some(30));
    }
}
