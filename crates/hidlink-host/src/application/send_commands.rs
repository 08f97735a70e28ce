//! CommandWriter: paced transmission of protocol lines to the device.
//!
//! # Why pace at all? (for beginners)
//!
//! The device executes each line as soon as it arrives and never answers.
//! Typing `w,hello` takes the device five key presses; if the host sent the
//! next line immediately, the following chord could land in the middle of
//! the word.  The writer therefore sleeps after every line for roughly the
//! time the device needs to finish it:
//!
//! ```text
//! m,<dx>,<dy>   no wait (movement pacing belongs to the motion planner)
//! c  ..gap..  c random 80–150 ms between the two clicks of a double click
//! k,<name>      50 ms
//! w,<text>      50 ms × number of characters
//! combo,...     100 ms
//! ```
//!
//! The protocol is open-loop: these sleeps are the only synchronisation
//! between host and device.
//!
//! # Abort
//!
//! The writer shares an abort flag with the Ctrl-C handler.  Once it is set,
//! the next send returns [`SendError::Aborted`] without writing anything; a
//! line that was already written is never interrupted.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use hidlink_core::{encode_line, protocol::MAX_TEXT_LEN, Action, KeyName};
use rand::Rng;
use thiserror::Error;
use tracing::trace;

/// Error raised by a [`CommandTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot open {port}: {reason}")]
    Open { port: String, reason: String },
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Error type for command transmission.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("aborted by operator")]
    Aborted,
    /// A line break inside `w,<text>` would split the command in two.
    #[error("text contains a line break and cannot be sent as one command")]
    LineBreakInText,
    /// The `w,<text>` line would exceed what the device buffers.
    #[error("text of {len} bytes exceeds the {limit}-byte command limit")]
    TextTooLong { len: usize, limit: usize },
}

/// Byte channel toward the device.
///
/// The infrastructure implementation writes to a serial port; test
/// implementations record the lines.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Writes one complete, newline-terminated command line.
    async fn write_line(&self, line: &str) -> Result<(), TransportError>;
}

/// Waits the writer observes after each kind of command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingProfile {
    pub per_key: Duration,
    pub per_char: Duration,
    pub per_combo: Duration,
    pub double_click_gap_min: Duration,
    pub double_click_gap_max: Duration,
}

impl Default for PacingProfile {
    fn default() -> Self {
        Self {
            per_key: Duration::from_millis(50),
            per_char: Duration::from_millis(50),
            per_combo: Duration::from_millis(100),
            double_click_gap_min: Duration::from_millis(80),
            double_click_gap_max: Duration::from_millis(150),
        }
    }
}

impl PacingProfile {
    /// Wait after a `w,<text>` line of `char_count` characters.
    pub fn text_delay(&self, char_count: usize) -> Duration {
        let count = u32::try_from(char_count).unwrap_or(u32::MAX);
        self.per_char.saturating_mul(count)
    }

    /// Draws a gap uniformly from the double-click range.
    ///
    /// An inverted range collapses to its lower bound.
    pub fn double_click_gap(&self) -> Duration {
        let min = self.double_click_gap_min.as_millis() as u64;
        let max = (self.double_click_gap_max.as_millis() as u64).max(min);
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Serialises actions onto a transport and paces them.
pub struct CommandWriter {
    transport: Arc<dyn CommandTransport>,
    pacing: PacingProfile,
    abort: Arc<AtomicBool>,
}

impl CommandWriter {
    pub fn new(
        transport: Arc<dyn CommandTransport>,
        pacing: PacingProfile,
        abort: Arc<AtomicBool>,
    ) -> Self {
        Self {
            transport,
            pacing,
            abort,
        }
    }

    /// `true` once the operator asked to stop.
    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    /// Relative pointer move.  `(0, 0)` sends nothing.
    pub async fn send_move(&self, dx: i32, dy: i32) -> Result<(), SendError> {
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        self.emit(&Action::Move { dx, dy }).await
    }

    /// Single primary-button click.
    pub async fn send_click(&self) -> Result<(), SendError> {
        self.emit(&Action::Click).await
    }

    /// Two clicks separated by a randomised gap.
    pub async fn send_double_click(&self) -> Result<(), SendError> {
        self.emit(&Action::Click).await?;
        tokio::time::sleep(self.pacing.double_click_gap()).await;
        self.emit(&Action::Click).await
    }

    /// Press and release one named key.
    pub async fn send_key(&self, name: KeyName) -> Result<(), SendError> {
        self.emit(&Action::PressKey { name }).await?;
        tokio::time::sleep(self.pacing.per_key).await;
        Ok(())
    }

    /// Literal text.  Empty text sends nothing.
    ///
    /// # Errors
    ///
    /// [`SendError::LineBreakInText`] if `text` contains `\n` or `\r`.
    /// [`SendError::TextTooLong`] if the line would not fit the device buffer.
    pub async fn send_text(&self, text: &str) -> Result<(), SendError> {
        if text.is_empty() {
            return Ok(());
        }
        if text.contains(['\n', '\r']) {
            return Err(SendError::LineBreakInText);
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(SendError::TextTooLong {
                len: text.len(),
                limit: MAX_TEXT_LEN,
            });
        }
        self.emit(&Action::WriteText {
            text: text.to_string(),
        })
        .await?;
        tokio::time::sleep(self.pacing.text_delay(text.chars().count())).await;
        Ok(())
    }

    /// Chord: modifiers held while `target` is pressed.
    pub async fn send_combo(&self, modifiers: &[KeyName], target: KeyName) -> Result<(), SendError> {
        self.emit(&Action::Combo {
            modifiers: modifiers.to_vec(),
            target,
        })
        .await?;
        tokio::time::sleep(self.pacing.per_combo).await;
        Ok(())
    }

    /// Sends any action with the pacing of its kind.
    pub async fn send(&self, action: &Action) -> Result<(), SendError> {
        match action {
            Action::Move { dx, dy } => self.send_move(*dx, *dy).await,
            Action::Click => self.send_click().await,
            Action::WriteText { text } => self.send_text(text).await,
            Action::PressKey { name } => self.send_key(*name).await,
            Action::Combo { modifiers, target } => self.send_combo(modifiers, *target).await,
        }
    }

    /// Extra wait between commands.
    pub async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    async fn emit(&self, action: &Action) -> Result<(), SendError> {
        if self.is_aborted() {
            return Err(SendError::Aborted);
        }
        trace!(line = %action, "sending command");
        self.transport.write_line(&encode_line(action)).await?;
        Ok(())
    }
}
