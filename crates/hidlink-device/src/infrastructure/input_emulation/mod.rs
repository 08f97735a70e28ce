//! Platform-specific HID emulation implementations.
//!
//! The native implementation is selected at compile time via
//! `#[cfg(target_os = ...)]`; [`native_emulator`] hides that choice from
//! `main.rs`.

use std::sync::Arc;

use crate::application::interpret::{EmulationError, HidEmulator};

pub mod logging;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

/// Creates the emulator for the current operating system.
///
/// # Errors
///
/// Returns [`EmulationError`] if the platform input API cannot be opened
/// (e.g. no X display), or [`EmulationError::NotInitialized`] on an
/// unsupported OS.
pub fn native_emulator() -> Result<Arc<dyn HidEmulator>, EmulationError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsInputEmulator::new()))
    }
    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(linux::LinuxXTestEmulator::new()?))
    }
    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    {
        Err(EmulationError::NotInitialized)
    }
}
