//! Simulated cursor for tests.

use std::sync::Mutex;

use hidlink_core::{ScreenPoint, Step};

use crate::application::move_pointer::CursorSource;

/// A cursor that only moves when told to.
///
/// Paired with `RecordingTransport::driving`, every sent move lands here, so
/// it behaves like a remote pointer without acceleration.
#[derive(Debug, Default)]
pub struct SimulatedCursor {
    position: Mutex<ScreenPoint>,
}

impl SimulatedCursor {
    pub fn at(position: ScreenPoint) -> Self {
        Self {
            position: Mutex::new(position),
        }
    }

    pub fn apply(&self, step: Step) {
        let mut position = self.position.lock().unwrap_or_else(|p| p.into_inner());
        *position = position.offset(step);
    }
}

impl CursorSource for SimulatedCursor {
    fn cursor_position(&self) -> ScreenPoint {
        *self.position.lock().unwrap_or_else(|p| p.into_inner())
    }
}
