//! Protocol module containing the command line format and the key-name table.

pub mod command;
pub mod keys;

pub use command::{
    encode_line, parse_line, parse_line_bytes, Action, ParseError, MAX_LINE_LEN, MAX_TEXT_LEN,
};
pub use keys::KeyName;
