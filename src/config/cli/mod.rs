//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! churnwatch baseline --root /srv/churn
//! churnwatch drift --data-threshold 0.25
//! churnwatch retrain --config lifecycle.yaml
//! churnwatch history
//! churnwatch predict --json '{"num_songs": 120, ...}'
//! ```

mod core;
mod types;

#[cfg(test)]
mod tests;

pub use self::core::{
    parse_args, BaselineArgs, Cli, Command, CommonArgs, DriftArgs, HistoryArgs, PredictArgs, RetrainArgs,
};
pub use types::OutputFormat;
