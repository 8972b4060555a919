//! churnwatch CLI
//!
//! # Usage
//!
//! ```bash
//! # Retrain from the event log and publish the model
//! churnwatch retrain --root /srv/churn
//!
//! # Record the feature baseline
//! churnwatch baseline --root /srv/churn
//!
//! # Check drift, JSON to stdout
//! churnwatch drift --root /srv/churn --format json
//!
//! # Score one user
//! churnwatch predict --json '{"num_songs": 120, "thumbs_down": 3}'
//! ```

use clap::Parser;
use churnwatch::cli::{run_command, Cli, LogLevel};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
