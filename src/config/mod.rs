//! Configuration: YAML lifecycle settings, data-root layout and CLI arguments

pub mod cli;
mod layout;
mod lifecycle;
mod validate;

pub use cli::{
    parse_args, BaselineArgs, Cli, Command, CommonArgs, DriftArgs, HistoryArgs, OutputFormat, PredictArgs,
    RetrainArgs,
};
pub use layout::Layout;
pub use lifecycle::{ColumnsConfig, DriftConfig, LifecycleConfig, TrackingConfig, TrainingConfig};
pub use validate::{validate_config, ValidationError};
