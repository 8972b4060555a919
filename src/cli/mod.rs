//! CLI module for churnwatch
//!
//! Command handlers and the level-gated console output they share.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
