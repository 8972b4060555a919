//! Drift reports
//!
//! Composes data drift (current stats against the baseline snapshot) and
//! concept drift (first against latest retrain run) into one timestamped,
//! write-once JSON document.

mod generator;
mod types;


pub use generator::DriftReportGenerator;
pub use types::{DriftReport, GeneratedReport};
