//! Tests for experiment tracking

use std::path::PathBuf;

use super::storage::{InMemoryBackend, JsonFileBackend, TrackingBackend};
use super::*;

fn record(paths: &[PathBuf]) -> TrainingRecord<'_> {
    TrainingRecord {
        params: vec![("n_estimators".to_string(), "200".to_string())],
        metrics: vec![("accuracy".to_string(), 0.82), ("f1_1".to_string(), 0.61)],
        artifacts: paths.iter().map(PathBuf::as_path).collect(),
    }
}

#[test]
fn test_run_lifecycle_in_memory() {
    let mut tracker = ExperimentTracker::new("churn_prediction", InMemoryBackend::new());
    let run_id = tracker.start_run().unwrap();
    tracker.log_param(&run_id, "max_depth", "20").unwrap();
    tracker.log_metric(&run_id, "accuracy", 0.9).unwrap();

    let active = tracker.get_run(&run_id).unwrap();
    assert_eq!(active.status, RunStatus::Active);
    assert!(tracker.list_runs().unwrap().is_empty());

    tracker.end_run(&run_id, RunStatus::Completed).unwrap();
    let done = tracker.get_run(&run_id).unwrap();
    assert_eq!(done.status, RunStatus::Completed);
    assert_eq!(done.params["max_depth"], "20");
    assert!(done.end_time.is_some());
}

#[test]
fn test_logging_to_ended_run_fails() {
    let mut tracker = ExperimentTracker::new("exp", InMemoryBackend::new());
    let run_id = tracker.start_run().unwrap();
    tracker.end_run(&run_id, RunStatus::Failed).unwrap();

    assert!(matches!(tracker.log_metric(&run_id, "x", 1.0), Err(TrackingError::RunNotActive(_))));
    assert!(matches!(tracker.end_run(&run_id, RunStatus::Completed), Err(TrackingError::RunNotFound(_))));
}

#[test]
fn test_unknown_run_not_found() {
    let tracker = ExperimentTracker::new("exp", InMemoryBackend::new());
    assert!(matches!(tracker.get_run("nope"), Err(TrackingError::RunNotFound(_))));
}

#[test]
fn test_run_ids_are_unique_within_a_second() {
    let mut tracker = ExperimentTracker::new("exp", InMemoryBackend::new());
    let a = tracker.start_run().unwrap();
    let b = tracker.start_run().unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_observer_records_completed_run() {
    let mut tracker = ExperimentTracker::new("churn_prediction", InMemoryBackend::new());
    let artifacts = vec![PathBuf::from("models/versions/x/model.json")];
    let run_id = tracker.on_training_complete(&record(&artifacts)).unwrap();

    let run = tracker.get_run(&run_id).unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.metrics["accuracy"], 0.82);
    assert_eq!(run.params["n_estimators"], "200");
    assert_eq!(run.artifacts, vec!["models/versions/x/model.json".to_string()]);
}

#[test]
fn test_json_backend_persists_under_experiment_dir() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::for_experiment(dir.path().join("mlruns"), "churn_prediction");
    let mut tracker = ExperimentTracker::new("churn_prediction", backend);

    let run_id = tracker.on_training_complete(&record(&[])).unwrap();
    let file = dir.path().join("mlruns").join("churn_prediction").join(format!("{run_id}.json"));
    assert!(file.is_file());

    let reopened = JsonFileBackend::for_experiment(dir.path().join("mlruns"), "churn_prediction");
    let runs = reopened.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].metrics["f1_1"], 0.61);
    assert!(reopened.contains(&run_id).unwrap());
}

#[test]
fn test_json_backend_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("absent"));
    assert!(backend.list_runs().unwrap().is_empty());
    assert!(backend.load_run("20240101_000000").unwrap().is_none());
}
