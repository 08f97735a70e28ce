//! Application layer use cases for the host.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules, here in `hidlink_core`) and the infrastructure
//! (serial port, OS cursor, console).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "put the
//!   pointer on this coordinate and type this string there").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no OS calls and no direct file or port access**.
//!
//! # Sub-modules
//!
//! - **`send_commands`** – `CommandWriter`: encodes actions as wire lines and
//!   paces them so the device keeps up.  Every other use case sends through it.
//!
//! - **`move_pointer`** – Closed-loop damped motion onto a screen coordinate.
//!
//! - **`type_text`** – Types a mixed-script string via the typing plan.
//!
//! - **`automation`** – One acquire → move → click → type run, and the
//!   interactive retry/continue loop around it.

pub mod automation;
pub mod move_pointer;
pub mod send_commands;
pub mod type_text;
