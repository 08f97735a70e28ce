//! Windows input emulation via the SendInput API.
//!
//! Translates HID Usage IDs to Windows Virtual Key codes and injects
//! events using `SendInput`.  Pointer reports are relative
//! (`MOUSEEVENTF_MOVE` without `MOUSEEVENTF_ABSOLUTE`), matching what a USB
//! mouse delivers.

#![cfg(target_os = "windows")]

use hidlink_core::keymap::{hid::HidKeyCode, windows_vk::is_extended_vk, KeyMapper};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MOVE, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};

use crate::application::interpret::{EmulationError, HidEmulator};

/// Windows implementation of [`HidEmulator`] using SendInput.
pub struct WindowsInputEmulator;

impl WindowsInputEmulator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsInputEmulator {
    fn default() -> Self {
        Self::new()
    }
}

impl HidEmulator for WindowsInputEmulator {
    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        send_key(KeyMapper::hid_to_windows_vk(key), false)
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        send_key(KeyMapper::hid_to_windows_vk(key), true)
    }

    fn emit_pointer_move(&self, dx: i8, dy: i8) -> Result<(), EmulationError> {
        send_mouse(i32::from(dx), i32::from(dy), MOUSEEVENTF_MOVE)
    }

    fn emit_primary_button(&self, pressed: bool) -> Result<(), EmulationError> {
        let flags = if pressed {
            MOUSEEVENTF_LEFTDOWN
        } else {
            MOUSEEVENTF_LEFTUP
        };
        send_mouse(0, 0, flags)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Flags for a keyboard `INPUT` carrying virtual key `vk`.
fn key_flags(vk: u8, key_up: bool) -> KEYBD_EVENT_FLAGS {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    if is_extended_vk(vk) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    flags
}

fn send_key(vk: u8, key_up: bool) -> Result<(), EmulationError> {
    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(u16::from(vk)),
                wScan: 0,
                dwFlags: key_flags(vk, key_up),
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    submit(input)
}

fn send_mouse(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> Result<(), EmulationError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    submit(input)
}

/// Hands one event to `SendInput`, which reports how many events it inserted.
fn submit(input: INPUT) -> Result<(), EmulationError> {
    // SAFETY: input is a fully initialised INPUT structure on the stack and
    // the size argument matches its type.
    let inserted = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if inserted == 1 {
        Ok(())
    } else {
        Err(EmulationError::Platform(
            "SendInput rejected the event (blocked by UIPI or another thread)".to_string(),
        ))
    }
}
