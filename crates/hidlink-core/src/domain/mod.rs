//! Domain logic for hidlink.
//!
//! This module contains pure planning logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from OS APIs, serial-port libraries, async runtimes,
//!   or UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the domain answers two questions without touching any hardware:
//! "which relative step brings the pointer closer to its target?" and
//! "which commands, in which order, type this string on the remote side?".
//! The host application layer asks these questions and performs the I/O.

/// Damped pointer steps toward a target.
pub mod motion;

/// Script classification and run partitioning.
pub mod text;

/// Command plans for typing mixed-script strings.
pub mod typing;
