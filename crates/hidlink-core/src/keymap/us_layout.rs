//! US keyboard layout: which physical key (and whether Shift) types a character.
//!
//! The device types `w,<text>` commands one character at a time.  Because a
//! USB keyboard only reports key positions, every character has to be turned
//! into a [`Keystroke`] first.  The remote host is assumed to use the US
//! layout; any other layout will produce different characters for the same
//! keystrokes.
//!
//! Coverage is printable ASCII (0x20–0x7E) plus `\n` and `\t`.  Everything
//! else returns `None` and the caller decides what to do.

use super::hid::HidKeyCode;

/// A single key press needed to produce one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: HidKeyCode,
    /// Whether Shift must be held while `key` is pressed.
    pub shift: bool,
}

impl Keystroke {
    const fn plain(key: HidKeyCode) -> Self {
        Self { key, shift: false }
    }

    const fn shifted(key: HidKeyCode) -> Self {
        Self { key, shift: true }
    }
}

/// Returns the keystroke that types `c` on a US layout.
pub fn keystroke_for(c: char) -> Option<Keystroke> {
    use HidKeyCode::*;

    if c.is_ascii_lowercase() || c.is_ascii_digit() {
        return HidKeyCode::letter(c)
            .or_else(|| HidKeyCode::digit(c))
            .map(Keystroke::plain);
    }
    if c.is_ascii_uppercase() {
        return HidKeyCode::letter(c).map(Keystroke::shifted);
    }

    let stroke = match c {
        ' ' => Keystroke::plain(Space),
        '\n' => Keystroke::plain(Enter),
        '\t' => Keystroke::plain(Tab),
        '-' => Keystroke::plain(Minus),
        '=' => Keystroke::plain(Equal),
        '[' => Keystroke::plain(BracketLeft),
        ']' => Keystroke::plain(BracketRight),
        '\\' => Keystroke::plain(Backslash),
        ';' => Keystroke::plain(Semicolon),
        '\'' => Keystroke::plain(Quote),
        '`' => Keystroke::plain(Backquote),
        ',' => Keystroke::plain(Comma),
        '.' => Keystroke::plain(Period),
        '/' => Keystroke::plain(Slash),
        '!' => Keystroke::shifted(Digit1),
        '@' => Keystroke::shifted(Digit2),
        '#' => Keystroke::shifted(Digit3),
        '$' => Keystroke::shifted(Digit4),
        '%' => Keystroke::shifted(Digit5),
        '^' => Keystroke::shifted(Digit6),
        '&' => Keystroke::shifted(Digit7),
        '*' => Keystroke::shifted(Digit8),
        '(' => Keystroke::shifted(Digit9),
        ')' => Keystroke::shifted(Digit0),
        '_' => Keystroke::shifted(Minus),
        '+' => Keystroke::shifted(Equal),
        '{' => Keystroke::shifted(BracketLeft),
        '}' => Keystroke::shifted(BracketRight),
        '|' => Keystroke::shifted(Backslash),
        ':' => Keystroke::shifted(Semicolon),
        '"' => Keystroke::shifted(Quote),
        '~' => Keystroke::shifted(Backquote),
        '<' => Keystroke::shifted(Comma),
        '>' => Keystroke::shifted(Period),
        '?' => Keystroke::shifted(Slash),
        _ => return None,
    };
    Some(stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_printable_ascii_character_is_typeable() {
        for byte in 0x20u8..=0x7E {
            let c = byte as char;
            assert!(keystroke_for(c).is_some(), "{c:?} must have a keystroke");
        }
    }

    #[test]
    fn test_lowercase_letter_needs_no_shift() {
        assert_eq!(
            keystroke_for('a'),
            Some(Keystroke { key: HidKeyCode::KeyA, shift: false })
        );
    }

    #[test]
    fn test_uppercase_letter_needs_shift() {
        assert_eq!(
            keystroke_for('A'),
            Some(Keystroke { key: HidKeyCode::KeyA, shift: true })
        );
    }

    #[test]
    fn test_hash_is_shifted_three() {
        assert_eq!(
            keystroke_for('#'),
            Some(Keystroke { key: HidKeyCode::Digit3, shift: true })
        );
    }

    #[test]
    fn test_comma_is_plain_comma_key() {
        assert_eq!(
            keystroke_for(','),
            Some(Keystroke { key: HidKeyCode::Comma, shift: false })
        );
    }

    #[test]
    fn test_non_ascii_characters_are_not_typeable() {
        for c in ['甘', 'é', 'Ω', '\u{7f}', '\r'] {
            assert_eq!(keystroke_for(c), None, "{c:?} should not be typeable");
        }
    }
}
