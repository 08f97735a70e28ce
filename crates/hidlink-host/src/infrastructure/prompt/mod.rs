//! Console operator prompt.
//!
//! After a failed search the operator types `r` to retry or `c` to exit;
//! any other answer asks again.  After a completed run, Enter continues and
//! `c` quits.  Answers are trimmed and case-insensitive.
//!
//! Questions go to stderr so stdout stays free for `--dry-run` output.
//! While waiting for an answer the prompt also watches the shared abort
//! flag, so Ctrl-C ends the program even when it is blocked on stdin.

use std::io::Write;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::application::automation::{CompletedDecision, NotFoundDecision, OperatorPrompt};

const ABORT_POLL: Duration = Duration::from_millis(100);

/// Reads operator answers line by line.
pub struct ConsoleOperatorPrompt<R = BufReader<Stdin>> {
    lines: Mutex<Lines<R>>,
    abort: Arc<AtomicBool>,
}

impl ConsoleOperatorPrompt {
    /// A prompt reading standard input.
    pub fn stdin(abort: Arc<AtomicBool>) -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()), abort)
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleOperatorPrompt<R> {
    pub fn from_reader(reader: R, abort: Arc<AtomicBool>) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
            abort,
        }
    }

    /// Prints `question` and waits for one answer.
    ///
    /// `None` means stdin closed or the operator aborted.
    async fn ask(&self, question: &str) -> std::io::Result<Option<String>> {
        eprint!("{question}");
        std::io::stderr().flush()?;

        let mut lines = self.lines.lock().await;
        tokio::select! {
            line = lines.next_line() => Ok(line?.map(|l| l.trim().to_lowercase())),
            () = wait_for_abort(&self.abort) => Ok(None),
        }
    }
}

async fn wait_for_abort(abort: &AtomicBool) {
    while !abort.load(Ordering::Relaxed) {
        tokio::time::sleep(ABORT_POLL).await;
    }
}

/// Maps an answer to the not-found prompt; `None` asks again.
fn parse_not_found(answer: &str) -> Option<NotFoundDecision> {
    match answer {
        "r" => Some(NotFoundDecision::Retry),
        "c" => Some(NotFoundDecision::Abort),
        _ => None,
    }
}

fn parse_completed(answer: &str) -> CompletedDecision {
    if answer == "c" {
        CompletedDecision::Quit
    } else {
        CompletedDecision::Continue
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> OperatorPrompt for ConsoleOperatorPrompt<R> {
    async fn on_target_not_found(&self) -> std::io::Result<NotFoundDecision> {
        loop {
            let Some(answer) = self.ask("target not found: 'r' retry, 'c' exit: ").await? else {
                return Ok(NotFoundDecision::Abort);
            };
            if let Some(decision) = parse_not_found(&answer) {
                return Ok(decision);
            }
        }
    }

    async fn on_completed(&self) -> std::io::Result<CompletedDecision> {
        match self.ask("done: Enter to run again, 'c' to quit: ").await? {
            Some(answer) => Ok(parse_completed(&answer)),
            None => Ok(CompletedDecision::Quit),
        }
    }
}
