//! Windows cursor position via `GetCursorPos`.

#![cfg(target_os = "windows")]

use hidlink_core::ScreenPoint;
use tracing::warn;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::application::move_pointer::CursorSource;

pub struct WindowsCursorSource;

impl WindowsCursorSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsCursorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorSource for WindowsCursorSource {
    fn cursor_position(&self) -> ScreenPoint {
        let mut point = POINT::default();
        // SAFETY: point is a valid, writable POINT on the stack.
        match unsafe { GetCursorPos(&mut point) } {
            Ok(()) => ScreenPoint::new(point.x, point.y),
            Err(e) => {
                // Happens on the secure desktop (UAC prompt, lock screen).
                warn!("GetCursorPos failed: {e}");
                ScreenPoint::default()
            }
        }
    }
}
