//! Cursor-position adapters.
//!
//! The motion loop needs the *host's* idea of where the pointer is after
//! every step, because the remote OS may accelerate or clip relative moves.
//!
//! | Platform | API |
//! |----------|-----|
//! | Windows  | `GetCursorPos` |
//! | Linux    | Xlib `XQueryPointer` on the root window |
//!
//! [`native_cursor`] picks the adapter for the running platform.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "windows")]
pub mod windows;

use std::sync::Arc;

use thiserror::Error;

use crate::application::move_pointer::CursorSource;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("cursor position unavailable: {0}")]
    Unavailable(String),
}

/// The cursor source of the running platform.
///
/// # Errors
///
/// [`CursorError::Unavailable`] if the platform is unsupported or the
/// display cannot be opened.
pub fn native_cursor() -> Result<Arc<dyn CursorSource>, CursorError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsCursorSource::new()))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(linux::X11CursorSource::new()?))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    {
        Err(CursorError::Unavailable(
            "no cursor adapter for this platform".to_string(),
        ))
    }
}
