//! Interaction state for a single mounted dropdown.

use super::render::DropdownLayout;
use log::debug;

/// Element of the dropdown a pointer gesture can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Field,
    Toggle,
    /// Popup row, by position in the filtered view.
    Row(usize),
}

/// Input delivered by the host to a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Press(Target),
    Release(Target),
    CancelPress,
    FocusGained,
    FocusLost,
    /// Replaces the whole field value.
    SetText(String),
    InsertChar(char),
    Backspace,
    HighlightNext,
    HighlightPrevious,
    ConfirmHighlighted,
    Dismiss,
}

impl Interaction {
    /// Whether applying this interaction needs the length of the filtered view.
    pub fn needs_view(&self) -> bool {
        matches!(
            self,
            Self::Release(Target::Row(_))
                | Self::HighlightNext
                | Self::HighlightPrevious
                | Self::ConfirmHighlighted
        )
    }
}

/// Result of applying an [`Interaction`] to [`DropdownState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    /// A press was recorded; nothing changes until the matching release.
    Pending,
    Focused,
    Opened,
    Closed,
    Edited,
    Highlighted,
    /// A popup row was chosen; the popup is already closed.
    Select(usize),
}

/// State owned by one dropdown instance for as long as it is mounted.
#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    text: String,
    expanded: bool,
    focused: bool,
    pending: Option<Target>,
    highlighted: Option<usize>,
    pub(super) offset: usize,
    pub(super) layout: DropdownLayout,
}

impl DropdownState {
    /// Creates closed state with `default_item` as the initial field text.
    pub fn new(default_item: impl Into<String>) -> Self {
        Self {
            text: default_item.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Hit regions recorded by the most recent render.
    pub fn layout(&self) -> &DropdownLayout {
        &self.layout
    }

    pub(super) fn set_text(&mut self, text: String) {
        self.text = text;
        self.highlighted = None;
        self.offset = 0;
    }

    /// Applies one interaction. `rows` is the length of the current filtered view.
    pub fn apply(&mut self, interaction: Interaction, enabled: bool, rows: usize) -> Transition {
        if !enabled {
            self.pending = None;
            return Transition::Ignored;
        }

        let transition = match interaction {
            Interaction::Press(target) => {
                self.pending = Some(target);
                Transition::Pending
            }
            Interaction::Release(target) => match self.pending.take() {
                Some(pending) if pending == target => self.commit(target, rows),
                _ => Transition::Ignored,
            },
            Interaction::CancelPress => {
                self.pending = None;
                Transition::Ignored
            }
            // Focus alone never opens; a pending toggle press opens on its release.
            Interaction::FocusGained => {
                if self.focused {
                    Transition::Ignored
                } else {
                    self.focused = true;
                    Transition::Focused
                }
            }
            Interaction::FocusLost => {
                self.focused = false;
                self.pending = None;
                self.close()
            }
            Interaction::SetText(text) => {
                self.focused = true;
                self.set_text(text);
                Transition::Edited
            }
            Interaction::InsertChar(ch) => {
                self.focused = true;
                let mut text = std::mem::take(&mut self.text);
                text.push(ch);
                self.set_text(text);
                Transition::Edited
            }
            Interaction::Backspace => {
                self.focused = true;
                let mut text = std::mem::take(&mut self.text);
                text.pop();
                self.set_text(text);
                Transition::Edited
            }
            Interaction::HighlightNext => self.move_highlight(rows, true),
            Interaction::HighlightPrevious => self.move_highlight(rows, false),
            Interaction::ConfirmHighlighted => match self.highlighted {
                Some(row) if self.expanded && row < rows => self.select(row),
                _ => Transition::Ignored,
            },
            Interaction::Dismiss => self.close(),
        };

        if transition != Transition::Ignored && transition != Transition::Pending {
            debug!(
                "dropdown transition {transition:?} (text={:?}, expanded={})",
                self.text, self.expanded
            );
        }
        transition
    }

    fn commit(&mut self, target: Target, rows: usize) -> Transition {
        match target {
            Target::Toggle | Target::Field => {
                self.focused = true;
                self.toggle()
            }
            Target::Row(row) if self.expanded && row < rows => self.select(row),
            Target::Row(_) => Transition::Ignored,
        }
    }

    fn toggle(&mut self) -> Transition {
        if self.expanded {
            self.close()
        } else {
            self.expanded = true;
            self.highlighted = None;
            self.offset = 0;
            Transition::Opened
        }
    }

    fn close(&mut self) -> Transition {
        if !self.expanded {
            return Transition::Ignored;
        }
        self.expanded = false;
        self.highlighted = None;
        Transition::Closed
    }

    fn select(&mut self, row: usize) -> Transition {
        self.expanded = false;
        self.highlighted = None;
        Transition::Select(row)
    }

    fn move_highlight(&mut self, rows: usize, forward: bool) -> Transition {
        if !self.expanded || rows == 0 {
            return Transition::Ignored;
        }

        let next = match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => rows - 1,
            (Some(row), true) => (row + 1) % rows,
            (Some(row), false) => (row + rows - 1) % rows,
        };
        self.highlighted = Some(next.min(rows - 1));
        Transition::Highlighted
    }
}
