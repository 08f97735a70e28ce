//! USB HID Usage ID to Windows Virtual Key (VK) code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code",
//! named `VK_*` in `<winuser.h>` (e.g., `VK_RETURN = 0x0D`).  The device-side
//! emulator on Windows feeds these to `SendInput`.
//!
//! Letters and digits share their ASCII uppercase/digit values (`VK_A = 0x41`,
//! `VK_0 = 0x30`), so they are computed rather than listed.  Punctuation uses
//! the `VK_OEM_*` codes of the US layout.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to its Windows Virtual Key code.
///
/// Every key reachable from the wire protocol has a VK equivalent, so this
/// translation is total.
pub fn hid_to_vk(hid: HidKeyCode) -> u8 {
    if let Some(i) = hid.letter_index() {
        return b'A' + i as u8;
    }
    if let Some(d) = hid.digit_value() {
        return b'0' + d as u8;
    }
    if let Some(n) = hid.function_number() {
        return 0x70 + (n - 1) as u8; // VK_F1
    }

    match hid {
        HidKeyCode::Enter => 0x0D,        // VK_RETURN
        HidKeyCode::Escape => 0x1B,       // VK_ESCAPE
        HidKeyCode::Backspace => 0x08,    // VK_BACK
        HidKeyCode::Tab => 0x09,          // VK_TAB
        HidKeyCode::Space => 0x20,        // VK_SPACE
        HidKeyCode::Minus => 0xBD,        // VK_OEM_MINUS
        HidKeyCode::Equal => 0xBB,        // VK_OEM_PLUS
        HidKeyCode::BracketLeft => 0xDB,  // VK_OEM_4
        HidKeyCode::BracketRight => 0xDD, // VK_OEM_6
        HidKeyCode::Backslash => 0xDC,    // VK_OEM_5
        HidKeyCode::Semicolon => 0xBA,    // VK_OEM_1
        HidKeyCode::Quote => 0xDE,        // VK_OEM_7
        HidKeyCode::Backquote => 0xC0,    // VK_OEM_3
        HidKeyCode::Comma => 0xBC,        // VK_OEM_COMMA
        HidKeyCode::Period => 0xBE,       // VK_OEM_PERIOD
        HidKeyCode::Slash => 0xBF,        // VK_OEM_2
        HidKeyCode::CapsLock => 0x14,     // VK_CAPITAL
        HidKeyCode::Insert => 0x2D,       // VK_INSERT
        HidKeyCode::Home => 0x24,         // VK_HOME
        HidKeyCode::PageUp => 0x21,       // VK_PRIOR
        HidKeyCode::Delete => 0x2E,       // VK_DELETE
        HidKeyCode::End => 0x23,          // VK_END
        HidKeyCode::PageDown => 0x22,     // VK_NEXT
        HidKeyCode::ArrowRight => 0x27,   // VK_RIGHT
        HidKeyCode::ArrowLeft => 0x25,    // VK_LEFT
        HidKeyCode::ArrowDown => 0x28,    // VK_DOWN
        HidKeyCode::ArrowUp => 0x26,      // VK_UP
        HidKeyCode::ControlLeft => 0xA2,  // VK_LCONTROL
        HidKeyCode::ShiftLeft => 0xA0,    // VK_LSHIFT
        HidKeyCode::AltLeft => 0xA4,      // VK_LMENU
        HidKeyCode::MetaLeft => 0x5B,     // VK_LWIN
        // Letters, digits and F-keys returned above.
        _ => unreachable!("{hid:?} is handled by the computed ranges"),
    }
}

/// Returns `true` for VK codes that must carry `KEYEVENTF_EXTENDEDKEY`.
pub fn is_extended_vk(vk: u8) -> bool {
    matches!(vk, 0x21..=0x28 | 0x2D | 0x2E | 0x5B)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_to_ascii_uppercase() {
        assert_eq!(hid_to_vk(HidKeyCode::KeyA), 0x41);
        assert_eq!(hid_to_vk(HidKeyCode::KeyU), 0x55);
        assert_eq!(hid_to_vk(HidKeyCode::KeyZ), 0x5A);
    }

    #[test]
    fn test_digits_map_to_ascii_digits() {
        assert_eq!(hid_to_vk(HidKeyCode::Digit0), 0x30);
        assert_eq!(hid_to_vk(HidKeyCode::Digit1), 0x31);
        assert_eq!(hid_to_vk(HidKeyCode::Digit9), 0x39);
    }

    #[test]
    fn test_function_keys_start_at_vk_f1() {
        assert_eq!(hid_to_vk(HidKeyCode::F1), 0x70);
        assert_eq!(hid_to_vk(HidKeyCode::F12), 0x7B);
    }

    #[test]
    fn test_named_keys_use_winuser_values() {
        assert_eq!(hid_to_vk(HidKeyCode::Enter), 0x0D);
        assert_eq!(hid_to_vk(HidKeyCode::Space), 0x20);
        assert_eq!(hid_to_vk(HidKeyCode::ShiftLeft), 0xA0);
        assert_eq!(hid_to_vk(HidKeyCode::ControlLeft), 0xA2);
    }

    #[test]
    fn test_navigation_keys_are_extended() {
        for key in [HidKeyCode::ArrowUp, HidKeyCode::Delete, HidKeyCode::Home] {
            assert!(is_extended_vk(hid_to_vk(key)), "{key:?} should be extended");
        }
        assert!(!is_extended_vk(hid_to_vk(HidKeyCode::KeyA)));
        assert!(!is_extended_vk(hid_to_vk(HidKeyCode::Enter)));
    }
}
