//! Infrastructure layer for the device application.
//!
//! Contains OS-facing adapters: input emulation APIs and the byte sources the
//! commands arrive on.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `hidlink_core`, but MUST NOT be imported by the `application` layer
//! (tests excepted).
//!
//! # Sub-modules
//!
//! - **`input_emulation`** – OS-specific implementations of `HidEmulator`.
//!   The correct implementation is selected at compile time using
//!   `#[cfg(target_os)]`.  A recording `MockHidEmulator` and a
//!   `LoggingEmulator` for dry runs are also provided.
//!
//! - **`byte_source`** – The serial port (via `serialport`) and stdin
//!   implementations of `ByteSource`.

pub mod byte_source;
pub mod input_emulation;
