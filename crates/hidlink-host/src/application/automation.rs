//! AutomationSession: the acquire → move → click → wait → type flow.
//!
//! # One run
//!
//! ```text
//! poll locator every search_poll ──(hit)──► jitter the coordinate
//!        │                                      │
//!   search_timeout                        move_to(target)
//!        │                                      │
//!        ▼                              double click
//!  TargetNotFound                               │
//!                                     sleep focus_settle
//!                                               │
//!                                       type the payload ──► Completed
//! ```
//!
//! The focus settle is a fixed delay, not a readiness signal: nothing tells
//! the host that the clicked field actually has focus.
//!
//! # Interactive loop
//!
//! [`run_interactive`] repeats runs and asks an [`OperatorPrompt`] what to do
//! after each one: retry or abort after a failed search, continue or quit
//! after a completed run.  Recovery is always a whole new run; single
//! commands are never retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hidlink_core::{ScreenPoint, Step};
use rand::Rng;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

use super::move_pointer::MovePointerUseCase;
use super::send_commands::{CommandWriter, SendError};
use super::type_text::TypeTextUseCase;

/// Vision collaborator: finds a template image on the host screen.
///
/// Implementations return the centre of the best match in absolute screen
/// coordinates, or `None`.  Capture or matching failures are reported as
/// `None`, never as errors.
#[cfg_attr(test, mockall::automock)]
pub trait TargetLocator: Send + Sync {
    fn locate(&self, template: &Path, threshold: f64) -> Option<ScreenPoint>;
}

/// Operator answer after a search timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundDecision {
    Retry,
    Abort,
}

/// Operator answer after a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletedDecision {
    Continue,
    Quit,
}

/// Asks the operator how to proceed between runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OperatorPrompt: Send + Sync {
    async fn on_target_not_found(&self) -> std::io::Result<NotFoundDecision>;
    async fn on_completed(&self) -> std::io::Result<CompletedDecision>;
}

/// Error type for the automation flow.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error(transparent)]
    Send(#[from] SendError),
    #[error("operator prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Result of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    TargetNotFound,
}

/// Totals reported when the interactive loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub completed: u32,
    pub not_found: u32,
}

/// Parameters of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomationSettings {
    pub image: PathBuf,
    pub threshold: f64,
    pub search_timeout: Duration,
    pub search_poll: Duration,
    /// Largest random offset, per axis, added to the located coordinate.
    pub click_jitter: i32,
    /// Wait between the double click and the first typed command.
    pub focus_settle: Duration,
    pub payload: String,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            image: PathBuf::from("target.png"),
            threshold: 0.8,
            search_timeout: Duration::from_secs(30),
            search_poll: Duration::from_millis(500),
            click_jitter: 3,
            focus_settle: Duration::from_secs(1),
            payload: "1#Aa甘蓝".to_string(),
        }
    }
}

pub struct AutomationSession {
    locator: Arc<dyn TargetLocator>,
    writer: Arc<CommandWriter>,
    mover: MovePointerUseCase,
    typer: TypeTextUseCase,
    settings: AutomationSettings,
}

impl AutomationSession {
    pub fn new(
        locator: Arc<dyn TargetLocator>,
        writer: Arc<CommandWriter>,
        mover: MovePointerUseCase,
        typer: TypeTextUseCase,
        settings: AutomationSettings,
    ) -> Self {
        Self {
            locator,
            writer,
            mover,
            typer,
            settings,
        }
    }

    /// Polls the locator until it reports a hit or the search times out.
    ///
    /// # Errors
    ///
    /// [`SendError::Aborted`] if the operator aborts during the search.
    pub async fn find_target(&self) -> Result<Option<ScreenPoint>, SendError> {
        let started = Instant::now();
        while started.elapsed() < self.settings.search_timeout {
            if self.writer.is_aborted() {
                return Err(SendError::Aborted);
            }
            if let Some(point) = self
                .locator
                .locate(&self.settings.image, self.settings.threshold)
            {
                return Ok(Some(point));
            }
            tokio::time::sleep(self.settings.search_poll).await;
        }
        Ok(None)
    }

    /// Performs one full run.
    ///
    /// # Errors
    ///
    /// Any [`SendError`] ends the run; `SendError::Aborted` means the
    /// operator pressed Ctrl-C.
    pub async fn run_once(&self) -> Result<RunOutcome, AutomationError> {
        info!(image = %self.settings.image.display(), "searching for target");
        let Some(found) = self.find_target().await? else {
            warn!(
                timeout = ?self.settings.search_timeout,
                "target not found before timeout"
            );
            return Ok(RunOutcome::TargetNotFound);
        };

        let target = found.offset(jitter(self.settings.click_jitter));
        info!(?found, ?target, "target found; moving");
        self.mover.move_to(target).await?;

        info!("double click");
        self.writer.send_double_click().await?;
        self.writer.pause(self.settings.focus_settle).await;

        self.typer.type_text(&self.settings.payload).await?;
        info!("run completed");
        Ok(RunOutcome::Completed)
    }
}

/// Random offset in `[-max, max]` on each axis.
fn jitter(max: i32) -> Step {
    let max = max.abs();
    let mut rng = rand::thread_rng();
    Step::new(rng.gen_range(-max..=max), rng.gen_range(-max..=max))
}

/// Repeats runs until the operator quits or aborts.
///
/// An operator abort (Ctrl-C) ends the loop cleanly.
///
/// # Errors
///
/// Transport failures and prompt I/O failures end the loop with an error.
pub async fn run_interactive(
    session: &AutomationSession,
    prompt: &dyn OperatorPrompt,
) -> Result<SessionSummary, AutomationError> {
    let mut summary = SessionSummary::default();

    loop {
        let outcome = match session.run_once().await {
            Ok(outcome) => outcome,
            Err(AutomationError::Send(SendError::Aborted)) => {
                info!("aborted by operator");
                return Ok(summary);
            }
            Err(e) => return Err(e),
        };

        match outcome {
            RunOutcome::TargetNotFound => {
                summary.not_found += 1;
                if prompt.on_target_not_found().await? == NotFoundDecision::Abort {
                    break;
                }
            }
            RunOutcome::Completed => {
                summary.completed += 1;
                if prompt.on_completed().await? == CompletedDecision::Quit {
                    break;
                }
            }
        }
    }

    Ok(summary)
}
