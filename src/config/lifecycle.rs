//! Lifecycle configuration (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::layout::Layout;
use super::validate::validate_config;
use crate::data::{ID_COLUMN, LABEL_COLUMN};
use crate::error::{Error, Result};
use crate::eval::drift::{DEFAULT_CONCEPT_DROP_THRESHOLD, DEFAULT_DATA_DRIFT_THRESHOLD};
use crate::train::{ForestParams, DEFAULT_TEST_SIZE};

/// Drift thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Relative mean change above which a feature drifted
    pub data_threshold: f64,
    /// Accuracy or class-1 F1 drop above which concept drift is flagged
    pub concept_threshold: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            data_threshold: DEFAULT_DATA_DRIFT_THRESHOLD,
            concept_threshold: DEFAULT_CONCEPT_DROP_THRESHOLD,
        }
    }
}

/// Identifier and label column names of the assembled dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub id: String,
    pub label: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self { id: ID_COLUMN.to_string(), label: LABEL_COLUMN.to_string() }
    }
}

/// Split and forest hyperparameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub test_size: f64,
    pub forest: ForestParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { test_size: DEFAULT_TEST_SIZE, forest: ForestParams::default() }
    }
}

/// Experiment tracking settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub enabled: bool,
    pub experiment: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { enabled: true, experiment: "churn_prediction".to_string() }
    }
}

/// Top-level configuration
///
/// ```yaml
/// root: /srv/churn
/// drift:
///   data_threshold: 0.2
///   concept_threshold: 0.1
/// training:
///   test_size: 0.2
///   forest:
///     n_estimators: 200
///     max_depth: 20
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub root: PathBuf,
    pub columns: ColumnsConfig,
    pub drift: DriftConfig,
    pub training: TrainingConfig,
    pub tracking: TrackingConfig,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            columns: ColumnsConfig::default(),
            drift: DriftConfig::default(),
            training: TrainingConfig::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

impl LifecycleConfig {
    pub fn layout(&self) -> Layout {
        Layout::new(&self.root)
    }

    /// Parse and validate YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))?;
        validate_config(&config).map_err(|e| Error::Config(format!("Invalid config: {e}")))?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&yaml)
    }

    /// Re-check after command-line overrides
    pub fn validate(&self) -> Result<()> {
        validate_config(self).map_err(|e| Error::Config(format!("Invalid config: {e}")))
    }
}
