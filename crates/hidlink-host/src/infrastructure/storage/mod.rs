//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML configuration file from an explicit path or the
//!   platform-appropriate directory.
//! - Validating value ranges before anything touches the serial port.
//! - Providing sensible defaults when the file does not exist yet (first run).
//! - Writing the effective configuration back out (`--print-config` output
//!   can be saved as a starting point).

pub mod config;
