//! dashrev CLI library
//!
//! Command definitions and rendering, exposed for integration testing.
//! The binary entry point is in main.rs.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
