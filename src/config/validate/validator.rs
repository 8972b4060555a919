//! Configuration validation logic

use super::error::ValidationError;
use crate::config::LifecycleConfig;

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Validate a lifecycle configuration
///
/// Checks:
/// - Drift thresholds are positive
/// - The test fraction lies strictly between 0 and 1
/// - Forest hyperparameters are usable
pub fn validate_config(config: &LifecycleConfig) -> Result<(), ValidationError> {
    if !positive(config.drift.data_threshold) {
        return Err(ValidationError::InvalidDataThreshold(config.drift.data_threshold));
    }
    if !positive(config.drift.concept_threshold) {
        return Err(ValidationError::InvalidConceptThreshold(config.drift.concept_threshold));
    }

    let test_size = config.training.test_size;
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ValidationError::InvalidTestSize(test_size));
    }

    let forest = &config.training.forest;
    if forest.n_estimators == 0 {
        return Err(ValidationError::InvalidEstimators(forest.n_estimators));
    }
    if forest.min_samples_leaf == 0 {
        return Err(ValidationError::InvalidMinSamplesLeaf(forest.min_samples_leaf));
    }
    if forest.max_depth == Some(0) {
        return Err(ValidationError::InvalidMaxDepth);
    }

    let columns = &config.columns;
    if columns.id.is_empty() || columns.label.is_empty() || columns.id == columns.label {
        return Err(ValidationError::InvalidColumns { id: columns.id.clone(), label: columns.label.clone() });
    }

    if config.tracking.enabled && config.tracking.experiment.trim().is_empty() {
        return Err(ValidationError::EmptyExperimentName);
    }

    Ok(())
}
