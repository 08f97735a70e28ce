//! Line-oriented command format shared by the host encoder and the device
//! interpreter.
//!
//! Wire format (one command per line, fields separated by `,`):
//! ```text
//! m,<dx>,<dy>                  relative pointer move, signed integers
//! c                            primary-button click
//! w,<text>                     literal text; commas inside the text survive
//! k,<name>                     named key press + release
//! combo,<mod>,...,<target>     press modifiers, press target, release all
//! ```
//!
//! # Why a text protocol? (for beginners)
//!
//! The device end is a small microcontroller reading a serial line.  A
//! human-readable line format means the device can be exercised from any
//! terminal program by typing `k,enter` and pressing Return, and a capture of
//! the serial traffic is readable as-is.  The price is that nothing in the
//! format acknowledges a command: the host paces itself with sleeps, and the
//! device silently drops anything it cannot parse.
//!
//! The parser here is the single source of truth for what "can parse" means.

use std::fmt;

use thiserror::Error;

use super::keys::KeyName;

/// Longest line (without terminator) the device will buffer.
pub const MAX_LINE_LEN: usize = 4096;

/// Longest text, in bytes, that fits one `w,<text>` line.
pub const MAX_TEXT_LEN: usize = MAX_LINE_LEN - "w,".len();

/// One decoded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Relative pointer displacement.
    Move { dx: i32, dy: i32 },
    /// Single primary-button press and release.
    Click,
    /// Literal characters typed one by one.
    WriteText { text: String },
    /// One named key, pressed then released.
    PressKey { name: KeyName },
    /// Chord: modifiers pressed in order, then `target`, then everything released.
    Combo { modifiers: Vec<KeyName>, target: KeyName },
}

/// Why a received line did not produce an [`Action`].
///
/// Every variant leads to the same outcome on the device (the line is dropped
/// and the buffer reset); the variants exist so the drop can be logged
/// precisely and tested.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line was empty after stripping whitespace.
    #[error("empty line")]
    Empty,

    /// The first field is not one of `m`, `c`, `w`, `k`, `combo`.
    #[error("unknown action {0:?}")]
    UnknownAction(String),

    /// The action has the wrong number of fields.
    #[error("action {action:?} takes {expected} fields, got {found}")]
    WrongArity {
        action: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// A move argument is not a 32-bit signed integer.
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),

    /// A key name is not in the key-name table.
    #[error("unknown key name {0:?}")]
    UnknownKey(String),

    /// A chord target that is a single character outside the key-name table.
    ///
    /// Tolerated as a no-op rather than treated as malformed input.
    #[error("chord target {0:?} is not a named key; ignored")]
    UnresolvedTarget(char),

    /// The line bytes are not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// The line exceeded [`MAX_LINE_LEN`] bytes before its terminator arrived.
    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },
}

impl ParseError {
    /// `true` for the tolerated chord-target case, which is a silent no-op
    /// rather than malformed input.
    pub fn is_tolerated(&self) -> bool {
        matches!(self, ParseError::UnresolvedTarget(_))
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

impl fmt::Display for Action {
    /// Renders the wire line without its terminating newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { dx, dy } => write!(f, "m,{dx},{dy}"),
            Action::Click => f.write_str("c"),
            Action::WriteText { text } => write!(f, "w,{text}"),
            Action::PressKey { name } => write!(f, "k,{name}"),
            Action::Combo { modifiers, target } => {
                f.write_str("combo")?;
                for modifier in modifiers {
                    write!(f, ",{modifier}")?;
                }
                write!(f, ",{target}")
            }
        }
    }
}

/// Encodes `action` as one complete wire line, including the trailing `\n`.
///
/// # Examples
///
/// ```rust
/// use hidlink_core::protocol::{encode_line, Action};
///
/// assert_eq!(encode_line(&Action::Move { dx: 5, dy: -3 }), "m,5,-3\n");
/// assert_eq!(encode_line(&Action::Click), "c\n");
/// ```
pub fn encode_line(action: &Action) -> String {
    let mut line = action.to_string();
    line.push('\n');
    line
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Parses one line (with or without its terminator) into an [`Action`].
///
/// Surrounding whitespace of the whole line is stripped first, so trailing
/// spaces of a `w,` payload do not survive the trip.
///
/// # Errors
///
/// Returns the [`ParseError`] describing why the line is not a command.
///
/// # Examples
///
/// ```rust
/// use hidlink_core::protocol::{parse_line, Action};
///
/// assert_eq!(
///     parse_line("w,hello, world\n"),
///     Ok(Action::WriteText { text: "hello, world".to_string() })
/// );
/// assert!(parse_line("xyz,1,2").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Action, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let fields: Vec<&str> = line.split(',').collect();
    let (tag, args) = fields.split_first().ok_or(ParseError::Empty)?;

    match *tag {
        "m" => parse_move(args),
        "c" => Ok(Action::Click),
        "w" => {
            if args.is_empty() {
                return Err(wrong_arity("w", "at least 2", fields.len()));
            }
            Ok(Action::WriteText {
                text: args.join(","),
            })
        }
        "k" => match args {
            [name] => Ok(Action::PressKey {
                name: name.parse()?,
            }),
            _ => Err(wrong_arity("k", "2", fields.len())),
        },
        "combo" => parse_combo(args, fields.len()),
        other => Err(ParseError::UnknownAction(other.to_string())),
    }
}

/// Decodes raw line bytes as UTF-8 and parses them.
///
/// # Errors
///
/// [`ParseError::InvalidUtf8`] when the bytes are not UTF-8, otherwise
/// whatever [`parse_line`] reports.
pub fn parse_line_bytes(bytes: &[u8]) -> Result<Action, ParseError> {
    let line = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
    parse_line(line)
}

fn parse_move(args: &[&str]) -> Result<Action, ParseError> {
    match args {
        [dx, dy] => Ok(Action::Move {
            dx: parse_int(dx)?,
            dy: parse_int(dy)?,
        }),
        _ => Err(wrong_arity("m", "3", args.len() + 1)),
    }
}

fn parse_int(field: &str) -> Result<i32, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidInteger(field.to_string()))
}

fn parse_combo(args: &[&str], found: usize) -> Result<Action, ParseError> {
    let Some((target, modifiers)) = args.split_last() else {
        return Err(wrong_arity("combo", "at least 3", found));
    };
    if modifiers.is_empty() {
        return Err(wrong_arity("combo", "at least 3", found));
    }

    // Chord tokens are matched exactly: no case folding, no trimming.
    let modifiers = modifiers
        .iter()
        .map(|m| {
            KeyName::lookup_exact(m).ok_or_else(|| ParseError::UnknownKey(m.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let target = match KeyName::lookup_exact(target) {
        Some(key) => key,
        None => {
            let mut chars = target.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Err(ParseError::UnresolvedTarget(c)),
                _ => Err(ParseError::UnknownKey(target.to_string())),
            };
        }
    };

    Ok(Action::Combo { modifiers, target })
}

fn wrong_arity(action: &'static str, expected: &'static str, found: usize) -> ParseError {
    ParseError::WrongArity {
        action,
        expected,
        found,
    }
}
