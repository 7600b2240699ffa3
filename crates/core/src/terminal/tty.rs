//! The controlling terminal, opened directly so the selector keeps working
//! when stdin and stdout are redirected.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::queue;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, error};
use rustix::termios::{self, OptionalActions, SpecialCodeIndex, Termios};

use super::interrupt::{self, InterruptGuard};
use super::{decode_key, utf8_sequence_len, KeyEvent, Terminal};
use crate::error::{Error, Result};

const TTY_PATH: &str = "/dev/tty";

/// Everything needed to put the terminal back the way it was.
///
/// Shared between the [`Tty`] and the interrupt hook; whichever gets there
/// first restores, the other one is a no-op.
pub struct RestoreState {
    file: File,
    saved: Termios,
    restored: AtomicBool,
    in_alt_buffer: AtomicBool,
}

impl RestoreState {
    pub(crate) fn new(file: File, saved: Termios) -> Self {
        Self {
            file,
            saved,
            restored: AtomicBool::new(false),
            in_alt_buffer: AtomicBool::new(false),
        }
    }

    /// Returns `Ok(false)` when the terminal had already been restored.
    pub fn restore(&self) -> std::io::Result<bool> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        let mut sequence = Vec::new();
        queue!(sequence, Show)?;
        if self.in_alt_buffer.swap(false, Ordering::SeqCst) {
            queue!(sequence, LeaveAlternateScreen)?;
        }
        let write_result = (&self.file).write_all(&sequence).and_then(|()| (&self.file).flush());

        // The attributes go back even if the escape sequences could not be written
        let attr_result = termios::tcsetattr(&self.file, OptionalActions::Now, &self.saved);

        write_result?;
        attr_result?;
        Ok(true)
    }

    fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

/// Handle on a terminal in raw mode.
///
/// Dropping the handle closes it, so raw mode is left on every exit path
/// including unwinding.
pub struct Tty {
    file: File,
    restore: Arc<RestoreState>,
    _interrupt: Option<InterruptGuard>,
}

impl Tty {
    /// Opens `/dev/tty`, saves its attributes, switches to raw mode and
    /// hides the cursor. SIGINT and SIGTERM restore the terminal until the
    /// handle is closed.
    pub fn open() -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(TTY_PATH)
            .map_err(Error::NoTty)?;

        let mut tty = Self::from_file(file)?;
        tty._interrupt = interrupt::arm(Arc::clone(&tty.restore));
        debug!("Opened {TTY_PATH} in raw mode");
        Ok(tty)
    }

    /// Takes over an already opened terminal device. No interrupt hook is
    /// armed.
    ///
    /// The window size is checked before anything is changed, so a device
    /// without one is left as it was.
    pub fn from_file(file: File) -> Result<Self> {
        window_size(&file)?;
        let restore_file = file.try_clone().map_err(Error::NoTty)?;

        let saved = termios::tcgetattr(&file).map_err(|e| Error::RawMode(e.into()))?;
        let mut raw = saved.clone();
        raw.make_raw();
        raw.special_codes[SpecialCodeIndex::VMIN] = 1;
        raw.special_codes[SpecialCodeIndex::VTIME] = 0;
        termios::tcsetattr(&file, OptionalActions::Now, &raw)
            .map_err(|e| Error::RawMode(e.into()))?;

        let mut tty = Self {
            file,
            restore: Arc::new(RestoreState::new(restore_file, saved)),
            _interrupt: None,
        };

        let mut sequence = Vec::new();
        queue!(sequence, Hide)?;
        if let Err(e) = tty.write_frame(&sequence) {
            tty.close();
            return Err(e);
        }

        Ok(tty)
    }

    fn read_some(&mut self, buffer: &mut [u8]) -> Result<usize> {
        loop {
            match self.file.read(buffer) {
                Ok(0) => return Err(Error::TerminalClosed),
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Stdio(e)),
            }
        }
    }
}

impl Terminal for Tty {
    fn size(&mut self) -> Result<(u16, u16)> {
        window_size(&self.file)
    }

    fn enter_alt_buffer(&mut self) -> Result<()> {
        let mut sequence = Vec::new();
        queue!(sequence, EnterAlternateScreen)?;
        self.write_frame(&sequence)?;
        self.restore.in_alt_buffer.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn exit_alt_buffer(&mut self) -> Result<()> {
        if !self.restore.in_alt_buffer.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let mut sequence = Vec::new();
        queue!(sequence, LeaveAlternateScreen)?;
        self.write_frame(&sequence)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.file.write_all(frame)?;
        self.file.flush()?;
        Ok(())
    }

    /// Reads up to three bytes and decodes the first key in them. A UTF-8
    /// character longer than the read is completed with a second read.
    ///
    /// Bytes after the first key are dropped, so a fast paste of `abc`
    /// yields `a`.
    fn read_key(&mut self) -> Result<KeyEvent> {
        let mut buffer = [0u8; 4];
        let mut n = self.read_some(&mut buffer[..3])?;

        let expected = utf8_sequence_len(buffer[0]);
        if expected > n {
            self.file
                .read_exact(&mut buffer[n..expected])
                .map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => Error::TerminalClosed,
                    _ => Error::Stdio(e),
                })?;
            n = expected;
        }

        Ok(decode_key(&buffer[..n]))
    }

    fn close(&mut self) {
        if self.restore.is_restored() {
            return;
        }
        match self.restore.restore() {
            Ok(true) => debug!("Restored the terminal"),
            Ok(false) => {}
            Err(e) => error!("Failed to restore the terminal: {e}"),
        }
        // Disarm the interrupt hook; the terminal no longer needs it
        self._interrupt = None;
    }
}

impl Drop for Tty {
    fn drop(&mut self) {
        self.close();
    }
}

fn window_size(file: &File) -> Result<(u16, u16)> {
    let size = termios::tcgetwinsize(file).map_err(|e| Error::IoctlFailed(e.into()))?;
    if size.ws_row == 0 || size.ws_col == 0 {
        return Err(Error::IoctlFailed(std::io::Error::other(
            "terminal reported a zero size",
        )));
    }

    Ok((size.ws_row, size.ws_col))
}

/// Opens a pseudo terminal pair, returning `(controller, device)`.
#[cfg(test)]
pub(crate) fn open_pty() -> (File, File) {
    use rustix::pty::{grantpt, openpt, ptsname, unlockpt, OpenptFlags};

    let controller = openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY).unwrap();
    grantpt(&controller).unwrap();
    unlockpt(&controller).unwrap();
    let name = ptsname(&controller, Vec::new()).unwrap();
    let device = OpenOptions::new()
        .read(true)
        .write(true)
        .open(name.to_str().unwrap())
        .unwrap();

    (File::from(controller), device)
}
