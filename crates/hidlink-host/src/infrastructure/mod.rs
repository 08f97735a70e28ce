//! Infrastructure layer for the host application.
//!
//! Contains OS-facing adapters: the serial transport, cursor-position
//! queries, target locators, the console operator prompt and TOML
//! configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `hidlink_core`, but MUST NOT be imported by the `application` layer.

pub mod cursor;
pub mod prompt;
pub mod storage;
pub mod transport;
pub mod vision;
