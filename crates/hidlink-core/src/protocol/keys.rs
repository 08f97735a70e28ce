//! Key-name table: the fixed set of key names a command may use.
//!
//! `k,<name>` and `combo,<mod>,...,<target>` refer to keys by canonical
//! lowercase names.  `k,` lookups are case-insensitive ([`KeyName::lookup`]);
//! chord tokens must match a table name exactly ([`KeyName::lookup_exact`]).
//! Any name outside this table invalidates the command that carries it.
//!
//! | Name                     | Key                       |
//! |--------------------------|---------------------------|
//! | `shift` `ctrl` `alt`     | left-hand modifiers       |
//! | `gui` / `win`            | left Windows / Super key  |
//! | `enter` `space` `tab`    | control keys              |
//! | `backspace` `esc`        | control keys              |
//! | `delete` `insert`        | editing cluster           |
//! | `home` `end` `pageup` `pagedown` | navigation        |
//! | `up` `down` `left` `right` | arrows                  |
//! | `capslock`               | Caps Lock                 |
//! | `f1` … `f12`             | function keys             |
//! | `a` … `z`                | letter keys               |
//!
//! Digits and punctuation are not table entries; they are typed with `w,`.

use std::fmt;
use std::str::FromStr;

use crate::keymap::hid::HidKeyCode;

use super::command::ParseError;

/// A key name that is known to resolve in the key-name table.
///
/// Holding a `KeyName` is proof that the name is valid, so encoding a command
/// from one can never produce a line the device would drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyName {
    name: &'static str,
    code: HidKeyCode,
}

impl KeyName {
    pub const SHIFT: KeyName = KeyName::new("shift", HidKeyCode::ShiftLeft);
    pub const CTRL: KeyName = KeyName::new("ctrl", HidKeyCode::ControlLeft);
    pub const ALT: KeyName = KeyName::new("alt", HidKeyCode::AltLeft);
    pub const ENTER: KeyName = KeyName::new("enter", HidKeyCode::Enter);
    pub const SPACE: KeyName = KeyName::new("space", HidKeyCode::Space);
    pub const U: KeyName = KeyName::new("u", HidKeyCode::KeyU);

    const fn new(name: &'static str, code: HidKeyCode) -> Self {
        Self { name, code }
    }

    /// Resolves `name` (case-insensitive, surrounding whitespace ignored).
    pub fn lookup(name: &str) -> Option<Self> {
        let wanted = name.trim();
        KEY_TABLE
            .iter()
            .copied()
            .find(|k| k.name.eq_ignore_ascii_case(wanted))
    }

    /// Resolves `name` only if it is spelled exactly as a table entry.
    pub fn lookup_exact(name: &str) -> Option<Self> {
        KEY_TABLE.iter().copied().find(|k| k.name == name)
    }

    /// The canonical lowercase name written on the wire.
    pub fn as_str(&self) -> &'static str {
        self.name
    }

    /// The physical key this name resolves to.
    pub fn code(&self) -> HidKeyCode {
        self.code
    }

    /// Iterates over every entry of the table, aliases included.
    pub fn all() -> impl Iterator<Item = KeyName> {
        KEY_TABLE.iter().copied()
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for KeyName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyName::lookup(s).ok_or_else(|| ParseError::UnknownKey(s.to_string()))
    }
}

static KEY_TABLE: &[KeyName] = {
    use HidKeyCode::*;
    &[
        KeyName::SHIFT,
        KeyName::CTRL,
        KeyName::ALT,
        KeyName::new("gui", MetaLeft),
        KeyName::new("win", MetaLeft),
        KeyName::ENTER,
        KeyName::SPACE,
        KeyName::new("backspace", Backspace),
        KeyName::new("tab", Tab),
        KeyName::new("esc", Escape),
        KeyName::new("delete", Delete),
        KeyName::new("insert", Insert),
        KeyName::new("home", Home),
        KeyName::new("end", End),
        KeyName::new("pageup", PageUp),
        KeyName::new("pagedown", PageDown),
        KeyName::new("up", ArrowUp),
        KeyName::new("down", ArrowDown),
        KeyName::new("left", ArrowLeft),
        KeyName::new("right", ArrowRight),
        KeyName::new("capslock", CapsLock),
        KeyName::new("f1", F1),
        KeyName::new("f2", F2),
        KeyName::new("f3", F3),
        KeyName::new("f4", F4),
        KeyName::new("f5", F5),
        KeyName::new("f6", F6),
        KeyName::new("f7", F7),
        KeyName::new("f8", F8),
        KeyName::new("f9", F9),
        KeyName::new("f10", F10),
        KeyName::new("f11", F11),
        KeyName::new("f12", F12),
        KeyName::new("a", KeyA),
        KeyName::new("b", KeyB),
        KeyName::new("c", KeyC),
        KeyName::new("d", KeyD),
        KeyName::new("e", KeyE),
        KeyName::new("f", KeyF),
        KeyName::new("g", KeyG),
        KeyName::new("h", KeyH),
        KeyName::new("i", KeyI),
        KeyName::new("j", KeyJ),
        KeyName::new("k", KeyK),
        KeyName::new("l", KeyL),
        KeyName::new("m", KeyM),
        KeyName::new("n", KeyN),
        KeyName::new("o", KeyO),
        KeyName::new("p", KeyP),
        KeyName::new("q", KeyQ),
        KeyName::new("r", KeyR),
        KeyName::new("s", KeyS),
        KeyName::new("t", KeyT),
        KeyName::U,
        KeyName::new("v", KeyV),
        KeyName::new("w", KeyW),
        KeyName::new("x", KeyX),
        KeyName::new("y", KeyY),
        KeyName::new("z", KeyZ),
    ]
};
