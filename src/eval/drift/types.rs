//! Type definitions for drift detection.

use serde::{Deserialize, Serialize};

/// Relative mean shift above which a feature is flagged
pub const DEFAULT_DATA_DRIFT_THRESHOLD: f64 = 0.2;

/// Metric drop above which concept drift is flagged
pub const DEFAULT_CONCEPT_DROP_THRESHOLD: f64 = 0.1;

/// Added to `|baseline mean|` so a zero baseline mean cannot divide by zero
pub const MEAN_EPSILON: f64 = 1e-8;

/// A feature whose mean moved beyond the threshold
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftedFeature {
    pub feature: String,
    pub baseline_mean: f64,
    pub current_mean: f64,
    pub relative_change: f64,
}

/// Counts from one data-drift comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataDriftSummary {
    /// Features present on both sides
    pub compared_features: usize,
    /// Features flagged as drifted
    pub drifted_features: usize,
    /// Features present on only one side
    pub skipped_features: usize,
}

impl DataDriftSummary {
    pub fn has_drift(&self) -> bool {
        self.drifted_features > 0
    }

    /// Percentage of compared features that drifted
    pub fn drift_percentage(&self) -> f64 {
        if self.compared_features == 0 {
            0.0
        } else {
            100.0 * self.drifted_features as f64 / self.compared_features as f64
        }
    }
}

/// Performance decay between the first and latest retraining runs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConceptDriftAlert {
    pub accuracy_drop: f64,
    pub f1_class1_drop: f64,
    pub has_concept_drift: bool,
    pub baseline_accuracy: f64,
    pub latest_accuracy: f64,
    pub baseline_f1_class1: f64,
    pub latest_f1_class1: f64,
}

/// Outcome of a concept-drift check.
///
/// `NoSignal` is the expected state until two runs exist; it is not a
/// failure. Serializes as `null` / the alert object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<ConceptDriftAlert>", into = "Option<ConceptDriftAlert>")]
pub enum ConceptDriftSignal {
    NoSignal,
    Alert(ConceptDriftAlert),
}

impl ConceptDriftSignal {
    pub fn alert(&self) -> Option<&ConceptDriftAlert> {
        match self {
            Self::NoSignal => None,
            Self::Alert(alert) => Some(alert),
        }
    }

    /// True only when an alert exists and crossed the threshold
    pub fn has_concept_drift(&self) -> bool {
        self.alert().is_some_and(|a| a.has_concept_drift)
    }
}

impl From<Option<ConceptDriftAlert>> for ConceptDriftSignal {
    fn from(value: Option<ConceptDriftAlert>) -> Self {
        value.map_or(Self::NoSignal, Self::Alert)
    }
}

impl From<ConceptDriftSignal> for Option<ConceptDriftAlert> {
    fn from(signal: ConceptDriftSignal) -> Self {
        match signal {
            ConceptDriftSignal::NoSignal => None,
            ConceptDriftSignal::Alert(alert) => Some(alert),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(has: bool) -> ConceptDriftAlert {
        ConceptDriftAlert {
            accuracy_drop: 0.12,
            f1_class1_drop: 0.05,
            has_concept_drift: has,
            baseline_accuracy: 0.9,
            latest_accuracy: 0.78,
            baseline_f1_class1: 0.7,
            latest_f1_class1: 0.65,
        }
    }

    #[test]
    fn test_summary_percentage() {
        let summary = DataDriftSummary { compared_features: 8, drifted_features: 2, skipped_features: 1 };
        assert!(summary.has_drift());
        assert!((summary.drift_percentage() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_percentage_zero_features() {
        assert_eq!(DataDriftSummary::default().drift_percentage(), 0.0);
    }

    #[test]
    fn test_no_signal_serializes_as_null() {
        let json = serde_json::to_string(&ConceptDriftSignal::NoSignal).unwrap();
        assert_eq!(json, "null");
        let back: ConceptDriftSignal = serde_json::from_str("null").unwrap();
        assert_eq!(back, ConceptDriftSignal::NoSignal);
    }

    #[test]
    fn test_alert_serializes_as_object() {
        let value = serde_json::to_value(ConceptDriftSignal::Alert(alert(true))).unwrap();
        assert_eq!(value["has_concept_drift"], serde_json::json!(true));
        assert!(value["f1_class1_drop"].is_number());
    }

    #[test]
    fn test_has_concept_drift() {
        assert!(!ConceptDriftSignal::NoSignal.has_concept_drift());
        assert!(!ConceptDriftSignal::Alert(alert(false)).has_concept_drift());
        assert!(ConceptDriftSignal::Alert(alert(true)).has_concept_drift());
    }
}
