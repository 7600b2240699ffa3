//! The interactive selector: formats the candidates, takes over the terminal
//! and loops render → read key → apply until the user commits or cancels.

use log::{debug, info};

use crate::config::SelectorConfig;
use crate::error::{Error, Result};
use crate::formatter::{format_candidates, Candidates};
use crate::render::{build_frame, Theme};
use crate::state::{Outcome, SelectorState};
use crate::terminal::{Terminal, Tty};

/// Lets the user pick one of `candidates` on the controlling terminal, using
/// the default configuration.
///
/// `display_fn` renders each candidate; `group_fn`, when given, groups
/// consecutive candidates under a header.
///
/// # Errors
///
/// [`Error::EmptyCandidateList`] before the terminal is touched,
/// [`Error::Cancelled`] when the user backs out, and terminal errors
/// ([`Error::NoTty`], [`Error::IoctlFailed`], ...) otherwise.
pub fn select<T, D>(
    candidates: Vec<T>,
    display_fn: D,
    group_fn: Option<&dyn Fn(&T) -> String>,
) -> Result<T>
where
    D: Fn(&T) -> String,
{
    select_with(
        candidates,
        display_fn,
        group_fn,
        &SelectorConfig::default(),
        Tty::open,
    )
}

/// Like [`select`], with an explicit configuration and terminal.
///
/// `open_terminal` is only called once the candidates are known to be
/// non-empty and formatted. The terminal is closed exactly once before this
/// returns, whatever the outcome.
pub fn select_with<T, D, Tm, O>(
    candidates: Vec<T>,
    display_fn: D,
    group_fn: Option<&dyn Fn(&T) -> String>,
    config: &SelectorConfig,
    open_terminal: O,
) -> Result<T>
where
    D: Fn(&T) -> String,
    Tm: Terminal,
    O: FnOnce() -> Result<Tm>,
{
    if candidates.is_empty() {
        return Err(Error::EmptyCandidateList);
    }

    let theme = config.theme()?;
    let header_template = match group_fn {
        Some(_) => config.header_template()?,
        None => None,
    };
    let candidates =
        format_candidates(candidates, display_fn, group_fn, header_template.as_ref())?;

    let mut terminal = open_terminal()?;
    let result = run_session(&mut terminal, candidates, config, &theme);
    if let Err(e) = terminal.exit_alt_buffer() {
        debug!("Could not leave the alternate screen: {e}");
    }
    terminal.close();

    match &result {
        Ok(_) => info!("Selection made"),
        Err(Error::Cancelled) => info!("Selection cancelled"),
        Err(e) => debug!("Selector failed: {e}"),
    }
    result
}

fn run_session<T, Tm: Terminal>(
    terminal: &mut Tm,
    mut candidates: Candidates<T>,
    config: &SelectorConfig,
    theme: &Theme,
) -> Result<T> {
    let (rows, _) = terminal.size()?;
    let viewport_height = config.viewport_height(rows);
    debug!(
        "Selecting from {} candidates, {viewport_height} rows visible",
        candidates.lookup.len()
    );

    terminal.enter_alt_buffer()?;

    let entries = std::mem::take(&mut candidates.entries);
    let mut state = SelectorState::new(&entries, config.match_mode, viewport_height);

    loop {
        let frame = build_frame(&state, &entries, theme)?;
        terminal.write_frame(&frame)?;

        let key = terminal.read_key()?;
        match state.handle_key(key, &entries) {
            Outcome::Continue => {}
            Outcome::Cancel => return Err(Error::Cancelled),
            Outcome::Commit(entry) => {
                let display = entries[entry].text();
                return candidates.take(display).ok_or_else(|| {
                    Error::Misc(format!("No candidate behind `{display}`"))
                });
            }
        }
    }
}
