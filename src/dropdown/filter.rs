//! Item filtering for the dropdown popup.
//!
//! The popup never shows the raw item list directly. Every frame the host hands
//! in a fresh slice of items and the current field text, and [`derive_view`]
//! decides which of them are eligible for display.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Builds the pattern used to match item labels against the typed text.
pub type FilterFn<'a> = dyn Fn(&str) -> Result<Regex, regex::Error> + 'a;

/// Error raised while preparing the filter pattern for a query.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter pattern for query `{query}`: {source}")]
    InvalidPattern {
        query: String,
        #[source]
        source: regex::Error,
    },
}

/// Default filter policy.
///
/// Matches any label that contains the query characters in order, with anything
/// in between, ignoring case. `"ab"` becomes `(?i)^.*a.*b.*$`.
pub fn default_pattern(query: &str) -> Result<Regex, regex::Error> {
    if query.is_empty() {
        return Regex::new("^.*$");
    }

    let mut pattern = String::from("^.*");
    for ch in query.chars() {
        pattern.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
        pattern.push_str(".*");
    }
    pattern.push('$');

    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Items eligible for display, as indices into the source slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    fn all(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Maps a popup row back to the index of its item in the source slice.
    pub fn source_index(&self, row: usize) -> Option<usize> {
        self.indices.get(row).copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterates `(source index, item)` pairs in display order.
    pub fn iter<'a, T>(&'a self, items: &'a [T]) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        self.indices
            .iter()
            .filter_map(move |&index| items.get(index).map(|item| (index, item)))
    }
}

/// Derives the popup contents from the current text.
///
/// Empty text, or text that already equals the label of some item, shows the
/// whole list. Otherwise only items whose label matches the filter pattern.
pub fn derive_view<T>(
    items: &[T],
    text: &str,
    to_label: &dyn Fn(&T) -> String,
    filter: Option<&FilterFn<'_>>,
) -> Result<FilteredView, FilterError> {
    if text.is_empty() || items.iter().any(|item| to_label(item) == text) {
        return Ok(FilteredView::all(items.len()));
    }

    let pattern = match filter {
        Some(filter) => filter(text),
        None => default_pattern(text),
    }
    .map_err(|source| FilterError::InvalidPattern {
        query: text.to_owned(),
        source,
    })?;

    let indices = items
        .iter()
        .enumerate()
        .filter(|(_, item)| pattern.is_match(&to_label(item)))
        .map(|(index, _)| index)
        .collect();

    Ok(FilteredView { indices })
}
