//! Narrows the browse list down to the entries matching a query.
//!
//! Matches keep their browse order. A separator survives when it leads into
//! a matching item, or when it is a group header that matches the query
//! itself, in which case the whole group is kept.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Deserialize;

use crate::formatter::DisplayEntry;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring.
    #[default]
    Substring,
    Fuzzy,
}

/// A compiled query.
pub struct Matcher {
    mode: MatchMode,
    query: String,
    fuzzy: SkimMatcherV2,
}

impl Matcher {
    #[must_use]
    pub fn new(mode: MatchMode, query: &str) -> Self {
        let query = match mode {
            MatchMode::Substring => query.to_lowercase(),
            MatchMode::Fuzzy => query.to_string(),
        };

        Self {
            mode,
            query,
            fuzzy: SkimMatcherV2::default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Display strings may carry color codes; those are ignored.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let plain = strip_ansi_escapes::strip_str(text);
        match self.mode {
            MatchMode::Substring => plain.to_lowercase().contains(&self.query),
            MatchMode::Fuzzy => self.fuzzy.fuzzy_match(&plain, &self.query).is_some(),
        }
    }
}

/// Returns the indexes into `entries` that stay visible for `matcher`.
#[must_use]
pub fn filter_entries(entries: &[DisplayEntry], matcher: &Matcher) -> Vec<usize> {
    if matcher.is_empty() {
        return (0..entries.len()).collect();
    }

    let mut visible = Vec::new();
    let mut pending: Vec<usize> = Vec::new();
    let mut header_matched = false;
    let mut previous_was_separator = false;

    for (index, entry) in entries.iter().enumerate() {
        match entry {
            DisplayEntry::Separator(text) => {
                if !previous_was_separator {
                    // A new section starts; whatever was pending had no match
                    pending.clear();
                    header_matched = false;
                }
                pending.push(index);
                if !text.is_empty() && matcher.matches(text) {
                    header_matched = true;
                }
                previous_was_separator = true;
            }
            DisplayEntry::Item(text) => {
                if header_matched || matcher.matches(text) {
                    for separator in pending.drain(..) {
                        if visible.is_empty() && entries[separator].is_spacer() {
                            continue;
                        }
                        visible.push(separator);
                    }
                    visible.push(index);
                }
                previous_was_separator = false;
            }
        }
    }

    visible
}
