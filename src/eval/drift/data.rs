//! Data drift: relative mean shift against the baseline snapshot.

use super::types::{DataDriftSummary, DriftedFeature, DEFAULT_DATA_DRIFT_THRESHOLD, MEAN_EPSILON};
use crate::error::{Error, Result};
use crate::eval::stats::FeatureStats;

/// `|current - baseline| / (|baseline| + ε)`
pub fn relative_change(baseline_mean: f64, current_mean: f64) -> f64 {
    (current_mean - baseline_mean).abs() / (baseline_mean.abs() + MEAN_EPSILON)
}

/// Flags features whose mean moved by more than `threshold` (relative)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataDriftDetector {
    threshold: f64,
}

impl Default for DataDriftDetector {
    fn default() -> Self {
        Self { threshold: DEFAULT_DATA_DRIFT_THRESHOLD }
    }
}

impl DataDriftDetector {
    /// Threshold must be finite and non-negative
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidInput(format!(
                "data drift threshold must be a non-negative number, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare every feature present on both sides.
    ///
    /// Features missing from either mapping are skipped. A feature is flagged
    /// when its relative change is strictly greater than the threshold.
    /// Output follows the baseline's order.
    pub fn detect(&self, baseline: &FeatureStats, current: &FeatureStats) -> Vec<DriftedFeature> {
        baseline
            .iter()
            .filter_map(|(feature, base)| {
                let cur = current.get(feature)?;
                let change = relative_change(base.mean, cur.mean);
                (change > self.threshold).then(|| DriftedFeature {
                    feature: feature.to_string(),
                    baseline_mean: base.mean,
                    current_mean: cur.mean,
                    relative_change: change,
                })
            })
            .collect()
    }

    /// Counts for a comparison whose flagged features are `drifted`
    pub fn summarize(
        baseline: &FeatureStats,
        current: &FeatureStats,
        drifted: &[DriftedFeature],
    ) -> DataDriftSummary {
        let compared = baseline.names().filter(|f| current.contains(f)).count();
        let only_baseline = baseline.len() - compared;
        let only_current = current.names().filter(|f| !baseline.contains(f)).count();
        DataDriftSummary {
            compared_features: compared,
            drifted_features: drifted.len(),
            skipped_features: only_baseline + only_current,
        }
    }
}
