//! Core CLI types - Cli, Command, and per-command argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::LifecycleConfig;
use crate::error::Result;

/// churnwatch: churn model lifecycle management
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "churnwatch")]
#[command(version)]
#[command(about = "Feature baselines, data and concept drift reports, and retraining for the churn model")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Recompute the baseline snapshot from the current dataset
    Baseline(BaselineArgs),

    /// Check data and concept drift and write a report
    Drift(DriftArgs),

    /// Run the retraining pipeline and publish the new model
    Retrain(RetrainArgs),

    /// List retraining runs, oldest first
    History(HistoryArgs),

    /// Score one feature vector with the published model
    Predict(PredictArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct CommonArgs {
    /// Data root holding data/, models/, retrain_history/ ...
    #[arg(long, env = "CHURNWATCH_ROOT")]
    pub root: Option<PathBuf>,

    /// YAML lifecycle configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Load `--config` (or defaults), then apply `--root`
    pub fn resolve(&self) -> Result<LifecycleConfig> {
        let mut config = match &self.config {
            Some(path) => LifecycleConfig::load(path)?,
            None => LifecycleConfig::default(),
        };
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        Ok(config)
    }
}

/// Arguments for the baseline command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dataset to summarize (defaults to the published training data)
    #[arg(long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,
}

/// Arguments for the drift command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DriftArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dataset to check (defaults to the published training data)
    #[arg(long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Override the relative mean-shift threshold
    #[arg(long)]
    pub data_threshold: Option<f64>,

    /// Override the accuracy / class-1 F1 drop threshold
    #[arg(long)]
    pub concept_threshold: Option<f64>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the retrain command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RetrainArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Event log to train from (defaults to data/customer_churn_mini.json)
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Override the number of trees
    #[arg(long)]
    pub n_estimators: Option<usize>,

    /// Override the split and forest seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip experiment tracking for this run
    #[arg(long)]
    pub no_tracking: bool,
}

/// Arguments for the history command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Override the concept drift threshold used for the summary line
    #[arg(long)]
    pub concept_threshold: Option<f64>,
}

/// Arguments for the predict command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Feature object as inline JSON, e.g. '{"num_songs": 120, ...}'
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,

    /// File holding the feature object
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
