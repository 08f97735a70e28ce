//! Key identities for the device side.
//!
//! The canonical representation is USB HID Usage IDs (page 0x07, Keyboard/Keypad).
//! Commands name keys by string (see [`crate::protocol::keys`]); characters
//! typed by `w,<text>` go through the US layout.  Platform-specific codes are
//! produced only at the emulation boundary.

pub mod hid;
pub mod linux_x11;
pub mod us_layout;
pub mod windows_vk;

pub use hid::HidKeyCode;
pub use us_layout::{keystroke_for, Keystroke};

/// Unified key mapper providing the platform translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a [`HidKeyCode`] to a Windows Virtual Key code.
    pub fn hid_to_windows_vk(hid: HidKeyCode) -> u8 {
        windows_vk::hid_to_vk(hid)
    }

    /// Translates a [`HidKeyCode`] to an unshifted X11 KeySym.
    pub fn hid_to_x11_keysym(hid: HidKeyCode) -> u32 {
        linux_x11::hid_to_keysym(hid)
    }
}
