//! Tests for data and concept drift detection

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use super::*;
use crate::eval::classification::{ClassMetrics, ClassificationReport};
use crate::eval::stats::{FeatureStats, Stats};
use crate::storage::{RetrainRun, RunId};

fn stats(mean: f64) -> Stats {
    Stats { mean, std: 1.0, min: mean - 1.0, max: mean + 1.0 }
}

fn feature_stats(entries: &[(&str, f64)]) -> FeatureStats {
    entries.iter().map(|&(name, mean)| (name.to_string(), stats(mean))).collect()
}

fn metrics(f1: f64) -> ClassMetrics {
    ClassMetrics { precision: f1, recall: f1, f1_score: f1, support: 10.0 }
}

fn run(day: u32, accuracy: f64, f1_class1: f64) -> RetrainRun {
    let at = NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(9, 0, 0).unwrap();
    let mut classes = std::collections::BTreeMap::new();
    classes.insert("0".to_string(), metrics(0.9));
    classes.insert("1".to_string(), metrics(f1_class1));
    RetrainRun {
        id: RunId::at(at),
        location: None,
        metrics: ClassificationReport { classes, accuracy, macro_avg: None, weighted_avg: None },
    }
}

// =========================================================================
// Data drift
// =========================================================================

#[test]
fn test_relative_change_formula() {
    assert_abs_diff_eq!(relative_change(10.0, 12.0), 0.2, epsilon = 1e-8);
    assert_abs_diff_eq!(relative_change(-4.0, -2.0), 0.5, epsilon = 1e-8);
}

#[test]
fn test_zero_baseline_mean_does_not_divide_by_zero() {
    let change = relative_change(0.0, 0.5);
    assert!(change.is_finite());
    assert!(change > 1e6);
}

#[test]
fn test_boundary_is_strict() {
    let detector = DataDriftDetector::default();
    let baseline = feature_stats(&[("num_songs", 10.0)]);

    // 10 -> 12 is a change of 0.2 (just under, because of the epsilon)
    let at_threshold = feature_stats(&[("num_songs", 12.0)]);
    assert!(detector.detect(&baseline, &at_threshold).is_empty());

    let over = feature_stats(&[("num_songs", 12.01)]);
    let drifted = detector.detect(&baseline, &over);
    assert_eq!(drifted.len(), 1);
    assert_eq!(drifted[0].feature, "num_songs");
    assert_eq!(drifted[0].baseline_mean, 10.0);
    assert_eq!(drifted[0].current_mean, 12.01);
}

#[test]
fn test_exact_threshold_not_flagged() {
    // Zero threshold: identical means give change 0, which is not > 0
    let detector = DataDriftDetector::new(0.0).unwrap();
    let baseline = feature_stats(&[("a", 3.0)]);
    assert!(detector.detect(&baseline, &baseline).is_empty());
}

#[test]
fn test_one_sided_features_skipped() {
    let detector = DataDriftDetector::default();
    let baseline = feature_stats(&[("kept", 1.0), ("removed", 1.0)]);
    let current = feature_stats(&[("kept", 5.0), ("added", 100.0)]);

    let drifted = detector.detect(&baseline, &current);
    assert_eq!(drifted.len(), 1);
    assert_eq!(drifted[0].feature, "kept");

    let summary = DataDriftDetector::summarize(&baseline, &current, &drifted);
    assert_eq!(summary.compared_features, 1);
    assert_eq!(summary.skipped_features, 2);
    assert!(summary.has_drift());
}

#[test]
fn test_output_follows_baseline_order() {
    let detector = DataDriftDetector::default();
    let baseline = feature_stats(&[("z", 1.0), ("a", 1.0), ("m", 1.0)]);
    let current = feature_stats(&[("a", 9.0), ("m", 9.0), ("z", 9.0)]);

    let names: Vec<String> = detector.detect(&baseline, &current).into_iter().map(|d| d.feature).collect();
    assert_eq!(names, ["z", "a", "m"]);
}

#[test]
fn test_invalid_threshold_rejected() {
    assert!(DataDriftDetector::new(-0.1).is_err());
    assert!(DataDriftDetector::new(f64::NAN).is_err());
    assert!(ConceptDriftDetector::new(f64::INFINITY).is_err());
}

// =========================================================================
// Concept drift
// =========================================================================

#[test]
fn test_fewer_than_two_runs_is_no_signal() {
    let detector = ConceptDriftDetector::default();
    assert_eq!(detector.detect(&[]).unwrap(), ConceptDriftSignal::NoSignal);
    assert_eq!(detector.detect(&[run(1, 0.9, 0.7)]).unwrap(), ConceptDriftSignal::NoSignal);
}

#[test]
fn test_accuracy_drop_flags_drift() {
    let runs = [run(1, 0.90, 0.70), run(2, 0.78, 0.65)];
    let signal = ConceptDriftDetector::default().detect(&runs).unwrap();
    let alert = signal.alert().unwrap();

    assert_abs_diff_eq!(alert.accuracy_drop, 0.12, epsilon = 1e-9);
    assert_abs_diff_eq!(alert.f1_class1_drop, 0.05, epsilon = 1e-9);
    assert!(alert.has_concept_drift);
    assert_eq!(alert.baseline_accuracy, 0.90);
    assert_eq!(alert.latest_f1_class1, 0.65);
}

#[test]
fn test_higher_threshold_suppresses_alert() {
    let runs = [run(1, 0.90, 0.70), run(2, 0.78, 0.65)];
    let signal = ConceptDriftDetector::new(0.15).unwrap().detect(&runs).unwrap();
    assert!(!signal.has_concept_drift());
    assert!(signal.alert().is_some());
}

#[test]
fn test_f1_drop_alone_flags_drift() {
    let runs = [run(1, 0.85, 0.70), run(2, 0.84, 0.55)];
    assert!(ConceptDriftDetector::default().detect(&runs).unwrap().has_concept_drift());
}

#[test]
fn test_compares_first_and_last_only() {
    // The middle run is terrible but not an endpoint
    let runs = [run(1, 0.90, 0.70), run(2, 0.40, 0.10), run(3, 0.89, 0.69)];
    let signal = ConceptDriftDetector::default().detect(&runs).unwrap();
    assert!(!signal.has_concept_drift());
}

#[test]
fn test_improvement_is_not_drift() {
    let runs = [run(1, 0.70, 0.50), run(2, 0.90, 0.80)];
    let alert = *ConceptDriftDetector::default().detect(&runs).unwrap().alert().unwrap();
    assert!(alert.accuracy_drop < 0.0);
    assert!(!alert.has_concept_drift);
}

#[test]
fn test_missing_positive_class_is_integrity_error() {
    let mut broken = run(2, 0.8, 0.6);
    broken.metrics.classes.remove("1");
    let result = ConceptDriftDetector::default().detect(&[run(1, 0.9, 0.7), broken]);
    assert!(matches!(result, Err(crate::error::Error::DataIntegrity(_))));
}
