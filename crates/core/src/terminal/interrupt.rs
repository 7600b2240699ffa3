//! SIGINT/SIGTERM handling while a terminal is in raw mode.
//!
//! The `ctrlc` handler is installed once per process. Each session arms it
//! by placing its [`RestoreState`] in a one-shot slot; the handler takes
//! whatever is in the slot, restores it and exits.

use std::sync::{Arc, Mutex, OnceLock};

use log::{error, warn};

use super::tty::RestoreState;

/// Conventional exit status for a process ended by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

static ARMED: Mutex<Option<Arc<RestoreState>>> = Mutex::new(None);
static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Keeps the interrupt hook armed for one session. Dropping it disarms.
pub struct InterruptGuard {
    _private: (),
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        if let Ok(mut slot) = ARMED.lock() {
            slot.take();
        }
    }
}

/// Arms the hook for `restore`. Returns `None` when the handler could not be
/// installed, in which case the session runs without interrupt protection.
pub fn arm(restore: Arc<RestoreState>) -> Option<InterruptGuard> {
    let installed = *INSTALLED.get_or_init(|| match ctrlc::set_handler(on_interrupt) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not install the interrupt handler: {e}");
            false
        }
    });
    if !installed {
        return None;
    }

    match ARMED.lock() {
        Ok(mut slot) => {
            *slot = Some(restore);
            Some(InterruptGuard { _private: () })
        }
        Err(_) => None,
    }
}

fn on_interrupt() {
    let armed = ARMED.lock().ok().and_then(|mut slot| slot.take());
    if let Some(restore) = armed {
        if let Err(e) = restore.restore() {
            error!("Failed to restore the terminal after an interrupt: {e}");
        }
    }
    std::process::exit(INTERRUPTED_EXIT_CODE);
}

#[cfg(test)]
mod tests {
    use rustix::termios;

    use super::*;
    use crate::terminal::tty::open_pty;

    fn armed() -> Option<Arc<RestoreState>> {
        ARMED.lock().unwrap().clone()
    }

    #[test]
    fn test_guard_disarms_on_drop() {
        let (_controller, device) = open_pty();
        let saved = termios::tcgetattr(&device).unwrap();
        let restore = Arc::new(RestoreState::new(device, saved));

        let guard = arm(Arc::clone(&restore)).expect("handler installs");
        assert!(armed().is_some_and(|slot| Arc::ptr_eq(&slot, &restore)));

        drop(guard);
        assert!(armed().is_none());
        // The session still holds its own reference
        assert_eq!(Arc::strong_count(&restore), 1);
    }
}
