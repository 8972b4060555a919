//! Classification metrics for model evaluation
//!
//! - Confusion matrix over class-index labels
//! - Per-class precision, recall, F1 and support
//! - sklearn-compatible report (JSON shape and text table)

mod confusion;
mod report;


pub use confusion::ConfusionMatrix;
pub use report::{ClassMetrics, ClassificationReport};

/// Label of the positive (churned) class in reports
pub const POSITIVE_CLASS: &str = "1";
