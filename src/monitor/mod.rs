//! Monitoring output for the deployed churn model

pub mod report;

pub use report::{DriftReport, DriftReportGenerator, GeneratedReport};
