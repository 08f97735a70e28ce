//! # hidlink-core
//!
//! Shared library for hidlink containing the serial line protocol, the
//! key-name table, HID key tables, text classification and the pointer
//! motion planner.
//!
//! This crate is used by both the host and the device applications.
//! It has zero dependencies on OS APIs, serial ports, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! hidlink drives a USB input-emulation device (a microcontroller that the
//! operating system sees as a real keyboard and mouse) from a controlling
//! host.  The host sends short text commands over a serial line; the device
//! turns each command into physical key presses and pointer movements.
//!
//! This crate (`hidlink-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – The wire format.  Every command is one newline-terminated
//!   line such as `m,10,-4` or `combo,shift,u`.  [`Action`] is the typed form;
//!   [`encode_line`] and [`parse_line`] convert between the two.
//!
//! - **`keymap`** – Key identities.  Commands name keys by lowercase strings;
//!   the device resolves them to USB HID Usage IDs, and the US keyboard layout
//!   turns literal characters into (key, shift) pairs.
//!
//! - **`domain`** – Pure planning logic with no OS dependencies: splitting a
//!   Unicode string into script runs, turning those runs into a paced command
//!   plan, and computing damped pointer steps toward a target.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::motion::{plan_step, MotionProfile, ScreenPoint, Step};
pub use domain::text::{runs, ScriptClass, TextRun};
pub use domain::typing::{plan_typing, ImeProfile, TypingStep};
pub use keymap::hid::HidKeyCode;
pub use protocol::command::{encode_line, parse_line, Action, ParseError};
pub use protocol::keys::KeyName;
