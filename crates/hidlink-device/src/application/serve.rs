//! The device read loop: poll the byte source, feed the interpreter, repeat.
//!
//! One loop, no worker threads.  Each iteration processes whatever bytes are
//! available right now and then polls again, so a quiet line never blocks
//! shutdown for longer than one read timeout.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use super::interpret::{CommandInterpreter, LineOutcome};

/// Size of the read buffer handed to the byte source each poll.
const READ_CHUNK: usize = 256;

/// Result of one poll of a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// `n` bytes were written to the start of the buffer.
    Bytes(usize),
    /// Nothing arrived within the source's poll interval.
    Idle,
    /// The source reached end of input and will never produce more bytes.
    Closed,
}

/// A byte stream the interpreter reads commands from.
pub trait ByteSource: Send {
    /// Reads whatever is available into `buf`, waiting at most one poll interval.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.  The loop treats it as transient.
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus>;
}

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub executed: u64,
    pub dropped: u64,
    pub failed: u64,
    pub read_errors: u64,
}

impl ServeStats {
    fn record(&mut self, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Executed(_) => self.executed += 1,
            LineOutcome::Dropped(_) => self.dropped += 1,
            LineOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Runs the read loop until `running` is cleared or the source closes.
pub fn serve(
    source: &mut dyn ByteSource,
    interpreter: &mut CommandInterpreter,
    running: &AtomicBool,
) -> ServeStats {
    let mut stats = ServeStats::default();
    let mut buf = [0u8; READ_CHUNK];

    while running.load(Ordering::SeqCst) {
        match source.read_available(&mut buf) {
            Ok(ReadStatus::Bytes(n)) => {
                for outcome in interpreter.feed(&buf[..n]) {
                    stats.record(&outcome);
                }
            }
            Ok(ReadStatus::Idle) => {}
            Ok(ReadStatus::Closed) => {
                tracing::info!("input closed");
                break;
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {}
            Err(e) => {
                stats.read_errors += 1;
                tracing::warn!(error = %e, pending = interpreter.pending(), "read error; buffer reset");
                interpreter.reset();
            }
        }
    }

    stats
}
