//! Linux X11 input emulation via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the hardware.
//! These events are delivered to the currently focused window exactly like real
//! input.
//!
//! The functions used here:
//! - `XTestFakeKeyEvent(display, keycode, is_press, time)` — key press/release.
//! - `XTestFakeRelativeMotionEvent(display, screen, dx, dy, time)` — relative pointer
//!   motion, the X11 equivalent of one USB mouse report.
//! - `XTestFakeButtonEvent(display, button, is_press, time)` — button
//!   press/release.
//!
//! Every call is followed by `XFlush` so that the event leaves the client-side
//! Xlib queue immediately instead of waiting for the next round-trip.
//!
//! # Key code translation
//!
//! ```text
//! HID Usage ID → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! A KeySym the current keyboard mapping has no key for yields keycode 0,
//! which is reported as a `Platform` error instead of being sent.
//!
//! # Permissions
//!
//! XTest requires access to the X display named by `DISPLAY`.  If it is not
//! set or the server refuses the connection, the constructor fails.

use std::ptr;
use std::sync::Mutex;

use hidlink_core::keymap::{hid::HidKeyCode, KeyMapper};
use x11::{xlib, xtest};

use crate::application::interpret::{EmulationError, HidEmulator};

/// Passing `CurrentTime` (0) means "use the server's current timestamp".
const CURRENT_TIME: xlib::Time = 0;

/// X11 button number of the primary (left) button.
const X_BUTTON_LEFT: u32 = 1;

/// Owned Xlib display connection.
struct Display(*mut xlib::Display);

// SAFETY: the pointer is only dereferenced by Xlib while the surrounding
// Mutex is held, so calls are never concurrent.
unsafe impl Send for Display {}

impl Drop for Display {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful XOpenDisplay and is closed once.
        unsafe {
            xlib::XCloseDisplay(self.0);
        }
    }
}

/// Linux X11/XTest input emulator.
pub struct LinuxXTestEmulator {
    display: Mutex<Display>,
}

impl LinuxXTestEmulator {
    /// Connects to the X display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns `EmulationError::Platform` if the X display cannot be opened.
    pub fn new() -> Result<Self, EmulationError> {
        // SAFETY: a null name asks Xlib to read DISPLAY; the result is checked.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(EmulationError::Platform(
                "cannot open X display (is DISPLAY set?)".to_string(),
            ));
        }
        Ok(Self {
            display: Mutex::new(Display(display)),
        })
    }

    fn with_display<T>(&self, f: impl FnOnce(*mut xlib::Display) -> T) -> T {
        let guard = self
            .display
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let out = f(guard.0);
        // SAFETY: the display pointer is valid for the lifetime of `guard`.
        unsafe {
            xlib::XFlush(guard.0);
        }
        out
    }

    fn send_key(&self, key: HidKeyCode, pressed: bool) -> Result<(), EmulationError> {
        let keysym = KeyMapper::hid_to_x11_keysym(key);
        self.with_display(|display| {
            // SAFETY: display is a live connection held under the mutex.
            let keycode = unsafe { xlib::XKeysymToKeycode(display, xlib::KeySym::from(keysym)) };
            if keycode == 0 {
                return Err(EmulationError::Platform(format!(
                    "no keycode for {key:?} (keysym 0x{keysym:04X}) in the current keymap"
                )));
            }
            // SAFETY: as above; XTest returns 0 when the extension is missing.
            let ok = unsafe {
                xtest::XTestFakeKeyEvent(display, u32::from(keycode), i32::from(pressed), CURRENT_TIME)
            };
            check(ok, "XTestFakeKeyEvent")
        })
    }
}

impl HidEmulator for LinuxXTestEmulator {
    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.send_key(key, true)
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.send_key(key, false)
    }

    fn emit_pointer_move(&self, dx: i8, dy: i8) -> Result<(), EmulationError> {
        self.with_display(|display| {
            // SAFETY: display is a live connection held under the mutex.
            let ok = unsafe {
                xtest::XTestFakeRelativeMotionEvent(
                    display,
                    -1, // screen_number: -1 selects the current screen
                    i32::from(dx),
                    i32::from(dy),
                    CURRENT_TIME,
                )
            };
            check(ok, "XTestFakeRelativeMotionEvent")
        })
    }

    fn emit_primary_button(&self, pressed: bool) -> Result<(), EmulationError> {
        self.with_display(|display| {
            // SAFETY: display is a live connection held under the mutex.
            let ok = unsafe {
                xtest::XTestFakeButtonEvent(display, X_BUTTON_LEFT, i32::from(pressed), CURRENT_TIME)
            };
            check(ok, "XTestFakeButtonEvent")
        })
    }
}

fn check(status: i32, call: &str) -> Result<(), EmulationError> {
    if status == 0 {
        Err(EmulationError::Platform(format!("{call} failed")))
    } else {
        Ok(())
    }
}
