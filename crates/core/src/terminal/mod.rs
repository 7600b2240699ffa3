//! Minimal terminal control used by the selector.
//!
//! The render loop only talks to the [`Terminal`] trait, so it can be driven
//! by the real controlling terminal ([`Tty`]) or by a scripted stand-in in
//! tests.

pub mod interrupt;
pub mod tty;

pub use tty::Tty;

use crate::error::Result;

const CTRL_C: u8 = 0x03;
const LINE_FEED: u8 = 0x0A;
const CARRIAGE_RETURN: u8 = 0x0D;
const ESCAPE: u8 = 0x1B;
const DELETE: u8 = 0x7F;

/// A single decoded keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    CtrlC,
    Backspace,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    PrintableChar(char),
}

impl KeyEvent {
    /// C0 controls, DEL and C1 controls are never added to a query.
    #[must_use]
    pub fn is_control(c: char) -> bool {
        c.is_control()
    }
}

/// Length of the UTF-8 sequence announced by `lead`, or 1 for ASCII and for
/// bytes that cannot start a sequence.
#[must_use]
pub fn utf8_sequence_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Decodes the bytes returned by one read of the terminal.
///
/// Callers pass at most four bytes and never an empty slice. Only the first
/// key is decoded; anything after it in the same read is dropped.
#[must_use]
pub fn decode_key(bytes: &[u8]) -> KeyEvent {
    match bytes {
        [CTRL_C, ..] => KeyEvent::CtrlC,
        [DELETE, ..] => KeyEvent::Backspace,
        [CARRIAGE_RETURN | LINE_FEED, ..] => KeyEvent::Enter,
        [ESCAPE] => KeyEvent::Escape,
        [ESCAPE, b'[', b'A'] => KeyEvent::ArrowUp,
        [ESCAPE, b'[', b'B'] => KeyEvent::ArrowDown,
        [first, ..] if *first >= 0xC0 => match std::str::from_utf8(bytes) {
            Ok(s) if s.chars().count() == 1 => {
                KeyEvent::PrintableChar(s.chars().next().unwrap_or(char::from(*first)))
            }
            _ => KeyEvent::PrintableChar(char::from(*first)),
        },
        [first, ..] => KeyEvent::PrintableChar(char::from(*first)),
        [] => KeyEvent::PrintableChar('\0'),
    }
}

/// The operations the selector needs from a terminal.
///
/// Raw mode is entered when an implementation is constructed and left in
/// [`Terminal::close`], which must be safe to call more than once.
pub trait Terminal {
    /// Returns `(rows, cols)`.
    fn size(&mut self) -> Result<(u16, u16)>;

    fn enter_alt_buffer(&mut self) -> Result<()>;

    fn exit_alt_buffer(&mut self) -> Result<()>;

    /// Writes a complete frame with a single output call.
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Blocks until the next keystroke arrives.
    fn read_key(&mut self) -> Result<KeyEvent>;

    /// Restores the terminal to its state before raw mode. Failures are
    /// logged, not returned.
    fn close(&mut self);
}
