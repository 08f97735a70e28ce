//! TypeTextUseCase: types an arbitrary string through the device.
//!
//! The planning is pure and lives in [`hidlink_core::plan_typing`]; this use
//! case only walks the plan, sending each command through the
//! [`CommandWriter`] (which applies the per-command pacing) and then waiting
//! the step's settle delay for the remote input method to catch up.

use std::sync::Arc;

use hidlink_core::{plan_typing, runs, ImeProfile};
use tracing::{debug, info};

use super::send_commands::{CommandWriter, SendError};

pub struct TypeTextUseCase {
    writer: Arc<CommandWriter>,
    ime: ImeProfile,
}

impl TypeTextUseCase {
    pub fn new(writer: Arc<CommandWriter>, ime: ImeProfile) -> Self {
        Self { writer, ime }
    }

    /// Types `text` and returns the number of commands sent.
    ///
    /// # Errors
    ///
    /// Stops at the first [`SendError`]; commands already sent stay typed.
    pub async fn type_text(&self, text: &str) -> Result<usize, SendError> {
        info!(text, "typing");
        for run in runs(text) {
            debug!(class = ?run.class, run = run.text, "text run");
        }

        let plan = plan_typing(text, &self.ime);
        for step in &plan {
            self.writer.send(&step.action).await?;
            self.writer.pause(step.settle).await;
        }
        Ok(plan.len())
    }
}
