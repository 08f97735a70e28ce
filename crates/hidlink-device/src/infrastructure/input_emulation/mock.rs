//! Mock HID emulator for unit testing.
//!
//! # Why a mock emulator?
//!
//! The real emulators (`WindowsInputEmulator`, `LinuxXTestEmulator`) make OS
//! API calls that:
//!
//! - Require a physical desktop session to run.
//! - Actually move the cursor or press keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! `MockHidEmulator` replaces all OS calls with in-memory recording.  Every
//! emitted event is pushed onto one ordered `Mutex<Vec<EmulatedEvent>>`, so a
//! test can assert both *what* was emitted and in *which order* (chords care
//! about the order of presses and releases).
//!
//! # Usage in tests
//!
//! ```ignore
//! let emulator = Arc::new(MockHidEmulator::new());
//! let mut interpreter = CommandInterpreter::new(Arc::clone(&emulator) as Arc<dyn HidEmulator>);
//!
//! interpreter.feed(b"k,enter\n");
//!
//! assert_eq!(
//!     emulator.events(),
//!     vec![EmulatedEvent::KeyDown(HidKeyCode::Enter), EmulatedEvent::KeyUp(HidKeyCode::Enter)]
//! );
//! ```
//!
//! # Failure injection
//!
//! `should_fail` makes every call fail; `fail_on_key_down` fails only the
//! press of one key, which is how the release-on-failure paths are tested.

use std::sync::{Mutex, MutexGuard};

use hidlink_core::keymap::HidKeyCode;

use crate::application::interpret::{EmulationError, HidEmulator};

/// One recorded emulator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatedEvent {
    KeyDown(HidKeyCode),
    KeyUp(HidKeyCode),
    PointerMove(i8, i8),
    PrimaryButton(bool),
}

/// A mock emulator that records all calls without performing OS API calls.
#[derive(Default)]
pub struct MockHidEmulator {
    /// Every successful call, in call order.
    pub events: Mutex<Vec<EmulatedEvent>>,
    /// When `true`, every method returns `EmulationError::Platform`.
    pub should_fail: bool,
    /// When set, pressing this key fails; all other calls succeed.
    pub fail_on_key_down: Option<HidKeyCode>,
}

impl MockHidEmulator {
    /// Creates a new `MockHidEmulator` with no records and no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<EmulatedEvent> {
        self.log().clone()
    }

    /// Keys pressed, in order.
    pub fn key_downs(&self) -> Vec<HidKeyCode> {
        self.log()
            .iter()
            .filter_map(|e| match e {
                EmulatedEvent::KeyDown(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    /// Relative pointer reports, in order.
    pub fn pointer_moves(&self) -> Vec<(i8, i8)> {
        self.log()
            .iter()
            .filter_map(|e| match e {
                EmulatedEvent::PointerMove(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    fn log(&self) -> MutexGuard<'_, Vec<EmulatedEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, event: EmulatedEvent) -> Result<(), EmulationError> {
        if self.should_fail {
            return Err(EmulationError::Platform("mock failure".into()));
        }
        self.log().push(event);
        Ok(())
    }
}

impl HidEmulator for MockHidEmulator {
    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        if self.fail_on_key_down == Some(key) {
            return Err(EmulationError::Platform(format!("mock failure on {key:?}")));
        }
        self.record(EmulatedEvent::KeyDown(key))
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.record(EmulatedEvent::KeyUp(key))
    }

    fn emit_pointer_move(&self, dx: i8, dy: i8) -> Result<(), EmulationError> {
        self.record(EmulatedEvent::PointerMove(dx, dy))
    }

    fn emit_primary_button(&self, pressed: bool) -> Result<(), EmulationError> {
        self.record(EmulatedEvent::PrimaryButton(pressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_events_in_call_order() {
        let em = MockHidEmulator::new();

        em.emit_key_down(HidKeyCode::KeyA).unwrap();
        em.emit_pointer_move(1, -1).unwrap();
        em.emit_key_up(HidKeyCode::KeyA).unwrap();

        assert_eq!(
            em.events(),
            vec![
                EmulatedEvent::KeyDown(HidKeyCode::KeyA),
                EmulatedEvent::PointerMove(1, -1),
                EmulatedEvent::KeyUp(HidKeyCode::KeyA),
            ]
        );
    }

    #[test]
    fn test_should_fail_records_nothing() {
        let em = MockHidEmulator {
            should_fail: true,
            ..MockHidEmulator::default()
        };

        assert!(em.emit_primary_button(true).is_err());
        assert!(em.events().is_empty());
    }

    #[test]
    fn test_fail_on_key_down_only_affects_that_key() {
        let em = MockHidEmulator {
            fail_on_key_down: Some(HidKeyCode::KeyU),
            ..MockHidEmulator::default()
        };

        assert!(em.emit_key_down(HidKeyCode::KeyU).is_err());
        assert!(em.emit_key_up(HidKeyCode::KeyU).is_ok());
        assert!(em.emit_key_down(HidKeyCode::ShiftLeft).is_ok());
    }
}
