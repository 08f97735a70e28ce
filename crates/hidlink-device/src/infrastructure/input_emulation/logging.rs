//! Dry-run emulator that logs every call instead of touching the OS.
//!
//! Selected with `--emulator log`.  Useful for checking what a host sends
//! without a desktop session, e.g. on a headless CI box or over SSH.

use hidlink_core::keymap::HidKeyCode;

use crate::application::interpret::{EmulationError, HidEmulator};

/// Emulator that only emits `tracing` events at `info` level.
#[derive(Debug, Default)]
pub struct LoggingEmulator;

impl LoggingEmulator {
    pub fn new() -> Self {
        Self
    }
}

impl HidEmulator for LoggingEmulator {
    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        tracing::info!(?key, usage = format_args!("0x{:02X}", key.usage_id()), "key down");
        Ok(())
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        tracing::info!(?key, "key up");
        Ok(())
    }

    fn emit_pointer_move(&self, dx: i8, dy: i8) -> Result<(), EmulationError> {
        tracing::info!(dx, dy, "pointer move");
        Ok(())
    }

    fn emit_primary_button(&self, pressed: bool) -> Result<(), EmulationError> {
        tracing::info!(pressed, "primary button");
        Ok(())
    }
}
