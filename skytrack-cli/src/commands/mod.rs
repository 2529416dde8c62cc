//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`parse`] - Decode a single datagram line
//! - [`run`] - Main command (receive telemetry and track the flight)

pub mod config;
pub mod parse;
pub mod run;
