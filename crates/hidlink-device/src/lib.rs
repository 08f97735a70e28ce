//! hidlink-device library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does hidlink-device do? (for beginners)
//!
//! The *device* is the side that produces real keyboard and pointer input.
//! It reads newline-terminated text commands from a serial line (or stdin),
//! and for each one:
//!
//! 1. Parses the line into an `Action` (`m,dx,dy`, `c`, `w,text`, `k,name`,
//!    `combo,mod,...,target`).  Lines that do not parse are dropped.
//! 2. Translates named keys and typed characters into USB HID key codes.
//! 3. Calls the platform input emulation API (`SendInput` on Windows, XTest
//!    on Linux) so the events look like physical input to the operating
//!    system.
//!
//! Nothing is ever sent back to the host.

/// Application layer: the command interpreter and the read loop.
pub mod application;

/// Infrastructure layer: OS input adapters and byte sources.
pub mod infrastructure;
