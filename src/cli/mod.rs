//! CLI infrastructure for the dropfour trainer
//!
//! Command implementations live in [`commands`]; the binary only parses
//! arguments and dispatches.

pub mod commands;
pub mod output;
