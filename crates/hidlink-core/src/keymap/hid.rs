//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the physical key identity every command resolves to on the device.
//! The key-name table, the US layout and the per-platform emulators all speak
//! in terms of [`HidKeyCode`].
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  A microcontroller that registers itself as a USB
//! keyboard sends these numbers in its input reports; the operating system then
//! applies the active keyboard layout to decide which character was typed.
//!
//! | Key          | HID Usage ID |
//! |--------------|-------------|
//! | Letter A     | 0x04        |
//! | Letter U     | 0x18        |
//! | Enter        | 0x28        |
//! | Left Shift   | 0xE1        |
//!
//! HID codes name **physical key positions**, not characters.  Typing a capital
//! `A` means holding `ShiftLeft` and pressing `KeyA`.
//!
//! Only the keys reachable from the wire protocol are listed: the named keys of
//! the key-name table and every key the US layout needs for printable ASCII.

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID on the keyboard/keypad page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HidKeyCode {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation keys (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    CapsLock = 0x39,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster (HID 0x49–0x52)
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Modifier keys (HID 0xE0–0xE3)
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
}

/// Letter keys in alphabetical order; index 0 is `KeyA`.
const LETTERS: [HidKeyCode; 26] = {
    use HidKeyCode::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN,
        KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ]
};

/// Digit keys indexed by their numeric value; index 0 is `Digit0`.
const DIGITS: [HidKeyCode; 10] = {
    use HidKeyCode::*;
    [
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    ]
};

impl HidKeyCode {
    /// Returns the raw USB HID Usage ID value for this key code.
    pub fn usage_id(self) -> u16 {
        self as u16
    }

    /// Returns the letter key for an ASCII letter of either case.
    pub fn letter(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            let index = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            Some(LETTERS[index])
        } else {
            None
        }
    }

    /// Returns the digit key for an ASCII digit.
    pub fn digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| DIGITS[d as usize])
    }

    /// Zero-based position in the alphabet for letter keys.
    pub(crate) fn letter_index(self) -> Option<u16> {
        let id = self.usage_id();
        (0x04..=0x1D).contains(&id).then(|| id - 0x04)
    }

    /// Numeric value for digit keys (`Digit0` is 0).
    pub(crate) fn digit_value(self) -> Option<u16> {
        match self {
            HidKeyCode::Digit0 => Some(0),
            other => {
                let id = other.usage_id();
                (0x1E..=0x26).contains(&id).then(|| id - 0x1E + 1)
            }
        }
    }

    /// One-based function key number (`F1` is 1).
    pub(crate) fn function_number(self) -> Option<u16> {
        let id = self.usage_id();
        (0x3A..=0x45).contains(&id).then(|| id - 0x3A + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_contiguous_from_0x04() {
        for (i, c) in ('a'..='z').enumerate() {
            // Arrange / Act
            let key = HidKeyCode::letter(c).expect("ASCII letter must map");

            // Assert
            assert_eq!(key.usage_id(), 0x04 + i as u16, "{c} should be 0x{:02X}", 0x04 + i);
        }
    }

    #[test]
    fn test_letter_lookup_ignores_case() {
        assert_eq!(HidKeyCode::letter('U'), Some(HidKeyCode::KeyU));
        assert_eq!(HidKeyCode::letter('u'), Some(HidKeyCode::KeyU));
    }

    #[test]
    fn test_letter_lookup_rejects_non_ascii() {
        assert_eq!(HidKeyCode::letter('é'), None);
        assert_eq!(HidKeyCode::letter('甘'), None);
        assert_eq!(HidKeyCode::letter('1'), None);
    }

    #[test]
    fn test_digit_zero_sits_after_nine() {
        // HID orders digits 1..9 then 0, unlike ASCII.
        assert_eq!(HidKeyCode::digit('1').map(HidKeyCode::usage_id), Some(0x1E));
        assert_eq!(HidKeyCode::digit('9').map(HidKeyCode::usage_id), Some(0x26));
        assert_eq!(HidKeyCode::digit('0').map(HidKeyCode::usage_id), Some(0x27));
    }

    #[test]
    fn test_digit_value_matches_digit_lookup() {
        for c in '0'..='9' {
            let key = HidKeyCode::digit(c).unwrap();
            assert_eq!(key.digit_value(), c.to_digit(10).map(|d| d as u16));
        }
    }

    #[test]
    fn test_function_number_covers_f1_to_f12_only() {
        assert_eq!(HidKeyCode::F1.function_number(), Some(1));
        assert_eq!(HidKeyCode::F7.function_number(), Some(7));
        assert_eq!(HidKeyCode::F12.function_number(), Some(12));
        assert_eq!(HidKeyCode::CapsLock.function_number(), None);
        assert_eq!(HidKeyCode::ArrowRight.function_number(), None);
    }
}
