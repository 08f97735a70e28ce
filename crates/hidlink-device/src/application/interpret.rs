//! CommandInterpreter: assembles received bytes into lines and executes them.
//!
//! The interpreter owns the parse buffer and nothing else.  Bytes arrive in
//! arbitrary chunks (one byte, half a line, three lines at once); every
//! complete line in a chunk is parsed and executed immediately, and the
//! incomplete tail stays buffered for the next call to [`CommandInterpreter::feed`].
//!
//! Execution goes through a [`HidEmulator`] trait object so that the same
//! interpreter drives a real OS input API in production and a recording mock
//! in tests.
//!
//! # Drop, never answer
//!
//! The line protocol has no acknowledgement channel.  A line that does not
//! parse is reported as [`LineOutcome::Dropped`] to the caller (for logging)
//! and otherwise forgotten; a line whose execution fails part-way is reported
//! as [`LineOutcome::Failed`].  Neither affects any later line.

use std::sync::Arc;

use hidlink_core::{
    keymap::{keystroke_for, HidKeyCode, Keystroke},
    protocol::{parse_line_bytes, Action, KeyName, ParseError, MAX_LINE_LEN},
};
use thiserror::Error;

/// Largest displacement of one relative pointer report, per axis.
pub const MAX_REPORT_DELTA: i32 = 127;

/// Error type for input emulation operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    /// `w,<text>` contained a character the US layout cannot type.
    #[error("character {0:?} cannot be typed on a US layout")]
    UnsupportedCharacter(char),
    #[error("emulator not initialized")]
    NotInitialized,
}

/// Platform-agnostic keyboard and pointer emulation.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait HidEmulator: Send + Sync {
    /// Presses `key` and leaves it held.
    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError>;

    /// Releases `key`.
    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError>;

    /// Moves the pointer by one relative report.
    fn emit_pointer_move(&self, dx: i8, dy: i8) -> Result<(), EmulationError>;

    /// Presses (`pressed = true`) or releases the primary (left) button.
    fn emit_primary_button(&self, pressed: bool) -> Result<(), EmulationError>;
}

/// What happened to one received line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line parsed and every emulator call succeeded.
    Executed(Action),
    /// The line did not parse; nothing was executed.
    Dropped(ParseError),
    /// The line parsed but an emulator call failed during execution.
    Failed(EmulationError),
}

/// The device-side command interpreter.
pub struct CommandInterpreter {
    emulator: Arc<dyn HidEmulator>,
    buffer: Vec<u8>,
    /// Set after an over-long line until its terminator has been skipped.
    discarding: bool,
}

impl CommandInterpreter {
    /// Creates an interpreter with an empty buffer.
    pub fn new(emulator: Arc<dyn HidEmulator>) -> Self {
        Self {
            emulator,
            buffer: Vec::with_capacity(64),
            discarding: false,
        }
    }

    /// Number of bytes of an incomplete line currently buffered.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Discards any partially received line.
    ///
    /// Called by the read loop after a transport error so that bytes on either
    /// side of the error are never glued into one command.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Consumes a chunk of received bytes and executes every line it completes.
    ///
    /// Returns one [`LineOutcome`] per completed (or overflowed) line, in
    /// arrival order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<LineOutcome> {
        let mut outcomes = Vec::new();

        for &byte in bytes {
            if self.discarding {
                if byte == b'\n' {
                    self.discarding = false;
                }
                continue;
            }

            if byte == b'\n' {
                let line = std::mem::take(&mut self.buffer);
                outcomes.push(self.dispatch(&line));
            } else if self.buffer.len() >= MAX_LINE_LEN {
                self.buffer.clear();
                self.discarding = true;
                let err = ParseError::LineTooLong {
                    limit: MAX_LINE_LEN,
                };
                tracing::warn!(error = %err, "dropping line");
                outcomes.push(LineOutcome::Dropped(err));
            } else {
                self.buffer.push(byte);
            }
        }

        outcomes
    }

    fn dispatch(&self, line: &[u8]) -> LineOutcome {
        match parse_line_bytes(line) {
            Ok(action) => match self.execute(&action) {
                Ok(()) => {
                    tracing::trace!(%action, "executed");
                    LineOutcome::Executed(action)
                }
                Err(error) => {
                    tracing::warn!(%action, %error, "execution failed");
                    LineOutcome::Failed(error)
                }
            },
            Err(ParseError::Empty) => LineOutcome::Dropped(ParseError::Empty),
            Err(error) if error.is_tolerated() => {
                tracing::trace!(%error, "chord without a table target, nothing to press");
                LineOutcome::Dropped(error)
            }
            Err(error) => {
                tracing::debug!(
                    line = %String::from_utf8_lossy(line).trim(),
                    %error,
                    "dropping line"
                );
                LineOutcome::Dropped(error)
            }
        }
    }

    /// Executes one action against the emulator.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmulationError`] encountered.  Keys pressed before
    /// the error are released before returning.
    pub fn execute(&self, action: &Action) -> Result<(), EmulationError> {
        match action {
            Action::Move { dx, dy } => self.move_pointer(*dx, *dy),
            Action::Click => {
                self.emulator.emit_primary_button(true)?;
                self.emulator.emit_primary_button(false)
            }
            Action::WriteText { text } => self.write_text(text),
            Action::PressKey { name } => self.tap(name.code()),
            Action::Combo { modifiers, target } => self.chord(modifiers, *target),
        }
    }

    // ── Execution helpers ─────────────────────────────────────────────────────

    fn move_pointer(&self, dx: i32, dy: i32) -> Result<(), EmulationError> {
        for (x, y) in report_chunks(dx, dy) {
            self.emulator.emit_pointer_move(x, y)?;
        }
        Ok(())
    }

    fn write_text(&self, text: &str) -> Result<(), EmulationError> {
        for c in text.chars() {
            let stroke = keystroke_for(c).ok_or(EmulationError::UnsupportedCharacter(c))?;
            self.type_stroke(stroke)?;
        }
        Ok(())
    }

    fn type_stroke(&self, stroke: Keystroke) -> Result<(), EmulationError> {
        if !stroke.shift {
            return self.tap(stroke.key);
        }
        self.emulator.emit_key_down(HidKeyCode::ShiftLeft)?;
        let typed = self.tap(stroke.key);
        let released = self.emulator.emit_key_up(HidKeyCode::ShiftLeft);
        typed.and(released)
    }

    fn tap(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.emulator.emit_key_down(key)?;
        self.emulator.emit_key_up(key)
    }

    fn chord(&self, modifiers: &[KeyName], target: KeyName) -> Result<(), EmulationError> {
        let mut pressed = Vec::with_capacity(modifiers.len() + 1);
        let mut result = Ok(());

        for key in modifiers.iter().chain(std::iter::once(&target)) {
            match self.emulator.emit_key_down(key.code()) {
                Ok(()) => pressed.push(key.code()),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        for key in pressed.into_iter().rev() {
            let released = self.emulator.emit_key_up(key);
            if result.is_ok() {
                result = released;
            }
        }
        result
    }
}

/// Splits a displacement into per-report steps of at most ±127 per axis.
///
/// The steps sum exactly to `(dx, dy)`; `(0, 0)` yields no steps.
pub fn report_chunks(dx: i32, dy: i32) -> impl Iterator<Item = (i8, i8)> {
    let mut rest = (i64::from(dx), i64::from(dy));
    let limit = i64::from(MAX_REPORT_DELTA);
    std::iter::from_fn(move || {
        if rest == (0, 0) {
            return None;
        }
        let x = rest.0.clamp(-limit, limit);
        let y = rest.1.clamp(-limit, limit);
        rest = (rest.0 - x, rest.1 - y);
        // Both values are within ±127 after clamping.
        Some((x as i8, y as i8))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
