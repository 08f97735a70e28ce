//! Application layer use cases for the device application.
//!
//! # What use cases does the device have?
//!
//! - **`interpret`** – Assembles received bytes into lines, parses each line
//!   into an `Action` and executes it through a `HidEmulator`.  The actual OS
//!   call is made by an emulator implementation injected at construction time.
//!
//! - **`serve`** – The read loop: polls a `ByteSource` (serial port or stdin),
//!   feeds the interpreter, and recovers from transport errors by discarding
//!   the partial line.

pub mod interpret;
pub mod serve;
