//! CLI command implementations

mod baseline;
mod drift;
mod history;
mod predict;
mod retrain;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};
use crate::error::Result;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Baseline(args) => baseline::run_baseline(args, log_level),
        Command::Drift(args) => drift::run_drift(args, log_level),
        Command::Retrain(args) => retrain::run_retrain(args, log_level),
        Command::History(args) => history::run_history(args, log_level),
        Command::Predict(args) => predict::run_predict(args, log_level),
    }
}
