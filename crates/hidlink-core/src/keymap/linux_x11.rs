//! USB HID Usage ID to X11 KeySym translation.
//!
//! Reference: X11 `keysymdef.h` (XK_* constants).
//!
//! # KeySyms versus keycodes (for beginners)
//!
//! X11 identifies keys by *KeySyms* (symbolic names such as `XK_a = 0x0061`).
//! `XTestFakeKeyEvent` takes a server *keycode*, so the Linux emulator does
//! the second hop with `XKeysymToKeycode`:
//!
//! ```text
//! HID Usage ID → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! The table always returns the **unshifted** KeySym of a key (`XK_1`, not
//! `XK_exclam`); Shift is pressed explicitly by the interpreter.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to the unshifted X11 KeySym of that key.
pub fn hid_to_keysym(hid: HidKeyCode) -> u32 {
    if let Some(i) = hid.letter_index() {
        return 0x0061 + i as u32; // XK_a
    }
    if let Some(d) = hid.digit_value() {
        return 0x0030 + d as u32; // XK_0
    }
    if let Some(n) = hid.function_number() {
        return 0xFFBE + (n - 1) as u32; // XK_F1
    }

    match hid {
        HidKeyCode::Enter => 0xFF0D,        // XK_Return
        HidKeyCode::Escape => 0xFF1B,       // XK_Escape
        HidKeyCode::Backspace => 0xFF08,    // XK_BackSpace
        HidKeyCode::Tab => 0xFF09,          // XK_Tab
        HidKeyCode::Space => 0x0020,        // XK_space
        HidKeyCode::Minus => 0x002D,        // XK_minus
        HidKeyCode::Equal => 0x003D,        // XK_equal
        HidKeyCode::BracketLeft => 0x005B,  // XK_bracketleft
        HidKeyCode::BracketRight => 0x005D, // XK_bracketright
        HidKeyCode::Backslash => 0x005C,    // XK_backslash
        HidKeyCode::Semicolon => 0x003B,    // XK_semicolon
        HidKeyCode::Quote => 0x0027,        // XK_apostrophe
        HidKeyCode::Backquote => 0x0060,    // XK_grave
        HidKeyCode::Comma => 0x002C,        // XK_comma
        HidKeyCode::Period => 0x002E,       // XK_period
        HidKeyCode::Slash => 0x002F,        // XK_slash
        HidKeyCode::CapsLock => 0xFFE5,     // XK_Caps_Lock
        HidKeyCode::Insert => 0xFF63,       // XK_Insert
        HidKeyCode::Home => 0xFF50,         // XK_Home
        HidKeyCode::PageUp => 0xFF55,       // XK_Page_Up
        HidKeyCode::Delete => 0xFFFF,       // XK_Delete
        HidKeyCode::End => 0xFF57,          // XK_End
        HidKeyCode::PageDown => 0xFF56,     // XK_Page_Down
        HidKeyCode::ArrowRight => 0xFF53,   // XK_Right
        HidKeyCode::ArrowLeft => 0xFF51,    // XK_Left
        HidKeyCode::ArrowDown => 0xFF54,    // XK_Down
        HidKeyCode::ArrowUp => 0xFF52,      // XK_Up
        HidKeyCode::ControlLeft => 0xFFE3,  // XK_Control_L
        HidKeyCode::ShiftLeft => 0xFFE1,    // XK_Shift_L
        HidKeyCode::AltLeft => 0xFFE9,      // XK_Alt_L
        HidKeyCode::MetaLeft => 0xFFEB,     // XK_Super_L
        _ => unreachable!("{hid:?} is handled by the computed ranges"),
    }
}
