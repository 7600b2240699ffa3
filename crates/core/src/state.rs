//! Cursor, scroll and query state of a selector session.

use crate::filter::{filter_entries, MatchMode, Matcher};
use crate::formatter::DisplayEntry;
use crate::terminal::KeyEvent;

/// What the render loop should do after a key was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The user chose the entry at this index of the browse list.
    Commit(usize),
    Cancel,
}

/// Live state of one session.
///
/// `filtered` holds indexes into the browse list; `cursor_index` and
/// `scroll_offset` index into `filtered`. Whenever `filtered` contains an
/// item, the cursor rests on one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorState {
    pub query: String,
    pub cursor_index: usize,
    pub scroll_offset: usize,
    pub filtered: Vec<usize>,
    pub viewport_height: usize,
    match_mode: MatchMode,
}

impl SelectorState {
    #[must_use]
    pub fn new(entries: &[DisplayEntry], match_mode: MatchMode, viewport_height: usize) -> Self {
        let mut state = Self {
            query: String::new(),
            cursor_index: 0,
            scroll_offset: 0,
            filtered: Vec::new(),
            viewport_height: viewport_height.max(1),
            match_mode,
        };
        state.refresh(entries);
        state
    }

    /// Re-runs the filter for the current query and settles the cursor.
    pub fn refresh(&mut self, entries: &[DisplayEntry]) {
        let matcher = Matcher::new(self.match_mode, &self.query);
        self.filtered = filter_entries(entries, &matcher);
        self.settle(entries);
    }

    /// Entry index under the cursor, if it is a selectable item.
    #[must_use]
    pub fn selected(&self, entries: &[DisplayEntry]) -> Option<usize> {
        self.filtered
            .get(self.cursor_index)
            .copied()
            .filter(|&entry| entries[entry].is_item())
    }

    #[must_use]
    pub fn has_matches(&self) -> bool {
        !self.filtered.is_empty()
    }

    /// One past the last visible row of `filtered`.
    #[must_use]
    pub fn visible_end(&self) -> usize {
        (self.scroll_offset + self.viewport_height).min(self.filtered.len())
    }

    pub fn handle_key(&mut self, key: KeyEvent, entries: &[DisplayEntry]) -> Outcome {
        match key {
            KeyEvent::CtrlC | KeyEvent::Escape => return Outcome::Cancel,
            KeyEvent::Enter => {
                if let Some(entry) = self.selected(entries) {
                    return Outcome::Commit(entry);
                }
            }
            KeyEvent::PrintableChar(c) => {
                if !KeyEvent::is_control(c) {
                    self.query.push(c);
                    self.reset_and_refresh(entries);
                }
            }
            KeyEvent::Backspace => {
                if self.query.pop().is_some() {
                    self.reset_and_refresh(entries);
                }
            }
            KeyEvent::ArrowUp => {
                let previous = (0..self.cursor_index)
                    .rev()
                    .find(|&i| entries[self.filtered[i]].is_item());
                if let Some(previous) = previous {
                    self.cursor_index = previous;
                    self.settle(entries);
                }
            }
            KeyEvent::ArrowDown => {
                let next = (self.cursor_index + 1..self.filtered.len())
                    .find(|&i| entries[self.filtered[i]].is_item());
                if let Some(next) = next {
                    self.cursor_index = next;
                    self.settle(entries);
                }
            }
        }

        Outcome::Continue
    }

    fn reset_and_refresh(&mut self, entries: &[DisplayEntry]) {
        self.cursor_index = 0;
        self.scroll_offset = 0;
        self.refresh(entries);
    }

    fn settle(&mut self, entries: &[DisplayEntry]) {
        if self.filtered.is_empty() {
            self.cursor_index = 0;
            self.scroll_offset = 0;
            return;
        }

        self.cursor_index = self.cursor_index.min(self.filtered.len() - 1);

        let is_item = |i: &usize| entries[self.filtered[*i]].is_item();
        if !is_item(&self.cursor_index) {
            self.cursor_index = (self.cursor_index..self.filtered.len())
                .find(is_item)
                .or_else(|| (0..self.cursor_index).rev().find(is_item))
                .unwrap_or(0);
        }

        if self.cursor_index < self.scroll_offset {
            self.scroll_offset = self.cursor_index;
        } else if self.cursor_index >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.cursor_index + 1 - self.viewport_height;
        }
    }
}
