//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid data drift threshold: {0} (must be a finite number > 0.0)")]
    InvalidDataThreshold(f64),

    #[error("Invalid concept drift threshold: {0} (must be a finite number > 0.0)")]
    InvalidConceptThreshold(f64),

    #[error("Invalid test size: {0} (must be in (0.0, 1.0))")]
    InvalidTestSize(f64),

    #[error("Invalid n_estimators: {0} (must be > 0)")]
    InvalidEstimators(usize),

    #[error("Invalid min_samples_leaf: {0} (must be > 0)")]
    InvalidMinSamplesLeaf(usize),

    #[error("Invalid max_depth: 0 (must be > 0 or omitted)")]
    InvalidMaxDepth,

    #[error("Identifier and label columns must be distinct and non-empty (id: '{id}', label: '{label}')")]
    InvalidColumns { id: String, label: String },

    #[error("Experiment name must not be empty when tracking is enabled")]
    EmptyExperimentName,
}
