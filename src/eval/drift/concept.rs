//! Concept drift: performance decay across retraining runs.

use super::types::{ConceptDriftAlert, ConceptDriftSignal, DEFAULT_CONCEPT_DROP_THRESHOLD};
use crate::error::{Error, Result};
use crate::eval::classification::{ClassificationReport, POSITIVE_CLASS};
use crate::storage::RetrainRun;

/// Compares the first run in history against the latest one
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConceptDriftDetector {
    drop_threshold: f64,
}

impl Default for ConceptDriftDetector {
    fn default() -> Self {
        Self { drop_threshold: DEFAULT_CONCEPT_DROP_THRESHOLD }
    }
}

fn positive_f1(run: &RetrainRun) -> Result<f64> {
    positive_class_f1(&run.metrics).ok_or_else(|| {
        Error::DataIntegrity(format!("run {} has no metrics for class '{POSITIVE_CLASS}'", run.id))
    })
}

fn positive_class_f1(report: &ClassificationReport) -> Option<f64> {
    report.class(POSITIVE_CLASS).map(|m| m.f1_score)
}

impl ConceptDriftDetector {
    /// Threshold must be finite and non-negative
    pub fn new(drop_threshold: f64) -> Result<Self> {
        if !drop_threshold.is_finite() || drop_threshold < 0.0 {
            return Err(Error::InvalidInput(format!(
                "concept drift threshold must be a non-negative number, got {drop_threshold}"
            )));
        }
        Ok(Self { drop_threshold })
    }

    pub fn drop_threshold(&self) -> f64 {
        self.drop_threshold
    }

    /// Check chronologically ordered `runs`.
    ///
    /// Fewer than two runs is `NoSignal`. Drift is flagged when the
    /// accuracy drop or the positive-class F1 drop is strictly greater than
    /// the threshold.
    pub fn detect(&self, runs: &[RetrainRun]) -> Result<ConceptDriftSignal> {
        let (first, last) = match runs {
            [first, .., last] => (first, last),
            _ => return Ok(ConceptDriftSignal::NoSignal),
        };

        let baseline_accuracy = first.metrics.accuracy;
        let latest_accuracy = last.metrics.accuracy;
        let baseline_f1_class1 = positive_f1(first)?;
        let latest_f1_class1 = positive_f1(last)?;

        let accuracy_drop = baseline_accuracy - latest_accuracy;
        let f1_class1_drop = baseline_f1_class1 - latest_f1_class1;

        Ok(ConceptDriftSignal::Alert(ConceptDriftAlert {
            accuracy_drop,
            f1_class1_drop,
            has_concept_drift: accuracy_drop > self.drop_threshold
                || f1_class1_drop > self.drop_threshold,
            baseline_accuracy,
            latest_accuracy,
            baseline_f1_class1,
            latest_f1_class1,
        }))
    }
}
