//! Builds one screen of the selector as a single byte buffer.

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::error::Result;
use crate::formatter::DisplayEntry;
use crate::state::SelectorState;

const CRLF: &str = "\r\n";
const NO_RESULTS: &str = "No results found.";
const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

/// Colors and prompt used when drawing; resolved once per session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub prompt_text: String,
    pub prompt: Color,
    pub highlight: Color,
    pub header: Color,
    pub no_results: Color,
    pub indicator: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt_text: "> ".to_string(),
            prompt: Color::Cyan,
            highlight: Color::Blue,
            header: Color::Yellow,
            no_results: Color::Red,
            indicator: Color::Cyan,
        }
    }
}

/// Renders the prompt, the visible slice of the filtered list and, when the
/// list does not fit, a `[shown/total]` indicator.
pub fn build_frame(
    state: &SelectorState,
    entries: &[DisplayEntry],
    theme: &Theme,
) -> Result<Vec<u8>> {
    let mut frame = Vec::new();

    queue!(
        frame,
        MoveTo(0, 0),
        Clear(ClearType::FromCursorDown),
        SetForegroundColor(theme.prompt),
        Print(&theme.prompt_text),
        ResetColor,
        Print(&state.query),
        Print(CRLF),
        Print(CRLF),
    )?;

    if !state.has_matches() {
        queue!(
            frame,
            SetForegroundColor(theme.no_results),
            Print(NO_RESULTS),
            ResetColor,
            Print(CRLF),
        )?;
        return Ok(frame);
    }

    let visible_end = state.visible_end();
    for row in state.scroll_offset..visible_end {
        match &entries[state.filtered[row]] {
            DisplayEntry::Separator(text) if text.is_empty() => {}
            DisplayEntry::Separator(text) => {
                queue!(
                    frame,
                    SetForegroundColor(theme.header),
                    Print(UNSELECTED_MARKER),
                    Print(text),
                    ResetColor,
                )?;
            }
            DisplayEntry::Item(text) if row == state.cursor_index => {
                queue!(
                    frame,
                    SetForegroundColor(theme.highlight),
                    SetAttribute(Attribute::Bold),
                    Print(SELECTED_MARKER),
                    Print(text),
                    SetAttribute(Attribute::Reset),
                )?;
            }
            DisplayEntry::Item(text) => {
                queue!(frame, Print(UNSELECTED_MARKER), Print(text))?;
            }
        }
        queue!(frame, Print(CRLF))?;
    }

    if state.filtered.len() > state.viewport_height {
        queue!(
            frame,
            Print(CRLF),
            SetForegroundColor(theme.indicator),
            Print(format!("[{}/{}]", visible_end, state.filtered.len())),
            ResetColor,
        )?;
    }

    Ok(frame)
}
