//! Linux cursor position via Xlib `XQueryPointer`.
//!
//! The query runs against the default root window, whose coordinate space
//! spans all monitors of the X screen, so the result is an absolute position.

use std::os::raw::{c_int, c_uint};
use std::ptr;
use std::sync::Mutex;

use hidlink_core::ScreenPoint;
use tracing::warn;
use x11::xlib;

use super::CursorError;
use crate::application::move_pointer::CursorSource;

/// Owned Xlib display connection.
struct Display(*mut xlib::Display);

// SAFETY: the pointer is only used by Xlib while the surrounding Mutex is
// held, so calls are never concurrent.
unsafe impl Send for Display {}

impl Drop for Display {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful XOpenDisplay and is closed once.
        unsafe {
            xlib::XCloseDisplay(self.0);
        }
    }
}

pub struct X11CursorSource {
    display: Mutex<Display>,
}

impl X11CursorSource {
    /// Connects to the X display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Unavailable`] if the display cannot be opened.
    pub fn new() -> Result<Self, CursorError> {
        // SAFETY: a null name asks Xlib to read DISPLAY; the result is checked.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(CursorError::Unavailable(
                "cannot open X display (is DISPLAY set?)".to_string(),
            ));
        }
        Ok(Self {
            display: Mutex::new(Display(display)),
        })
    }
}

impl CursorSource for X11CursorSource {
    fn cursor_position(&self) -> ScreenPoint {
        let guard = self
            .display
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let display = guard.0;

        let (mut root_return, mut child_return): (xlib::Window, xlib::Window) = (0, 0);
        let (mut root_x, mut root_y, mut win_x, mut win_y): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        let mut mask: c_uint = 0;

        // SAFETY: display is a live connection held under the mutex and all
        // out-pointers reference stack locals.
        let on_screen = unsafe {
            let root = xlib::XDefaultRootWindow(display);
            xlib::XQueryPointer(
                display,
                root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        if on_screen == 0 {
            warn!("pointer is not on the default screen");
        }
        ScreenPoint::new(root_x, root_y)
    }
}
