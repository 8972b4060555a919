//! Tests for configuration validation

use super::*;
use crate::config::LifecycleConfig;

#[test]
fn test_default_config_is_valid() {
    assert!(validate_config(&LifecycleConfig::default()).is_ok());
}

#[test]
fn test_non_positive_thresholds_rejected() {
    for bad in [0.0, -0.2, f64::NAN] {
        let mut config = LifecycleConfig::default();
        config.drift.data_threshold = bad;
        assert!(matches!(validate_config(&config), Err(ValidationError::InvalidDataThreshold(_))));

        let mut config = LifecycleConfig::default();
        config.drift.concept_threshold = bad;
        assert!(matches!(validate_config(&config), Err(ValidationError::InvalidConceptThreshold(_))));
    }
}

#[test]
fn test_test_size_bounds() {
    for bad in [0.0, 1.0, 1.5, -0.1] {
        let mut config = LifecycleConfig::default();
        config.training.test_size = bad;
        assert!(matches!(validate_config(&config), Err(ValidationError::InvalidTestSize(_))));
    }
    let mut config = LifecycleConfig::default();
    config.training.test_size = 0.3;
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_zero_trees_rejected() {
    let mut config = LifecycleConfig::default();
    config.training.forest.n_estimators = 0;
    assert!(matches!(validate_config(&config), Err(ValidationError::InvalidEstimators(0))));
}

#[test]
fn test_forest_limits_rejected() {
    let mut config = LifecycleConfig::default();
    config.training.forest.min_samples_leaf = 0;
    assert!(validate_config(&config).is_err());

    let mut config = LifecycleConfig::default();
    config.training.forest.max_depth = Some(0);
    assert!(matches!(validate_config(&config), Err(ValidationError::InvalidMaxDepth)));

    let mut config = LifecycleConfig::default();
    config.training.forest.max_depth = None;
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_columns_must_differ() {
    let mut config = LifecycleConfig::default();
    config.columns.label = config.columns.id.clone();
    assert!(matches!(validate_config(&config), Err(ValidationError::InvalidColumns { .. })));
}

#[test]
fn test_yaml_partial_override_keeps_defaults() {
    let yaml = "drift:\n  data_threshold: 0.3\ntraining:\n  forest:\n    n_estimators: 50\n";
    let config = LifecycleConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.drift.data_threshold, 0.3);
    assert_eq!(config.drift.concept_threshold, 0.1);
    assert_eq!(config.training.forest.n_estimators, 50);
    assert_eq!(config.training.forest.max_depth, Some(20));
    assert_eq!(config.training.test_size, 0.2);
}

#[test]
fn test_yaml_invalid_values_are_config_errors() {
    let err = LifecycleConfig::from_yaml("training:\n  test_size: 1.5\n").unwrap_err();
    assert!(matches!(err, crate::error::Error::Config(_)));
    assert!(LifecycleConfig::from_yaml("drift: [1, 2]").is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LifecycleConfig::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
