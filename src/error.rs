//! Error types for churnwatch.
//!
//! Integrity and missing-dependency failures are fatal and surface to the
//! operator. Absence of signal (no history yet, feature only present on one
//! side of a comparison) is modelled as a value, never as an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::eval::retrain::Stage;

/// Result type for churnwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the lifecycle subsystem
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset empty, feature entirely null, or required columns missing
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    /// Drift check requested before any baseline was saved
    #[error("Baseline snapshot not found: {path}\n  → Run `churnwatch baseline` to record one")]
    BaselineMissing { path: PathBuf },

    /// A retraining stage failed; later stages did not run
    #[error("Retrain stage '{stage}' failed: {source}")]
    PipelineStage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },

    /// Model input width disagrees with its feature-column list
    #[error("Artifact mismatch: model expects {expected} features, schema lists {actual}")]
    ArtifactMismatch { expected: usize, actual: usize },

    /// No model artifact has been published yet
    #[error("No published model artifact under {path}\n  → Run `churnwatch retrain` first")]
    ArtifactMissing { path: PathBuf },

    /// Caller supplied an unusable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON/YAML encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error as the failure of a retraining stage
    pub fn in_stage(stage: Stage, source: Error) -> Self {
        Self::PipelineStage { stage, source: Box::new(source) }
    }

    /// Whether the operator can fix this by changing input data or config
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::DataIntegrity(_)
            | Self::BaselineMissing { .. }
            | Self::ArtifactMissing { .. }
            | Self::InvalidInput(_)
            | Self::Config(_) => true,
            Self::PipelineStage { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_missing_is_actionable() {
        let err = Error::BaselineMissing { path: PathBuf::from("/data/baseline_stats.json") };
        let msg = err.to_string();
        assert!(msg.contains("baseline_stats.json"));
        assert!(msg.contains("churnwatch baseline"));
    }

    #[test]
    fn test_pipeline_stage_carries_source() {
        let err = Error::in_stage(Stage::Dataset, Error::DataIntegrity("no rows".into()));
        assert!(err.to_string().contains("dataset"));
        assert!(err.to_string().contains("no rows"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_io_is_not_user_error() {
        let err = Error::from(std::io::Error::other("disk"));
        assert!(!err.is_user_error());
    }
}
