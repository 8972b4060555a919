//! Tests for run history

use chrono::{NaiveDate, NaiveDateTime};

use super::*;
use crate::eval::classification::ClassificationReport;

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(h, m, s).unwrap()
}

fn report(accuracy_hits: usize) -> ClassificationReport {
    // `accuracy_hits` correct out of 4
    let y_true = vec![0, 1, 0, 1];
    let y_pred: Vec<usize> =
        y_true.iter().enumerate().map(|(i, &y)| if i < accuracy_hits { y } else { 1 - y }).collect();
    ClassificationReport::from_predictions(&y_pred, &y_true, 2)
}

#[test]
fn test_in_memory_append_and_list() {
    let mut history = InMemoryRunHistory::new();
    assert!(history.is_empty().unwrap());

    history.append_at(at(1, 0, 0), &report(4)).unwrap();
    history.append_at(at(2, 0, 0), &report(3)).unwrap();

    let runs = history.list().unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].id < runs[1].id);
    assert_eq!(history.latest().unwrap().unwrap().id, runs[1].id);
}

#[test]
fn test_same_second_gets_next_free_id() {
    let mut history = InMemoryRunHistory::new();
    let a = history.append_at(at(1, 0, 0), &report(4)).unwrap();
    let b = history.append_at(at(1, 0, 0), &report(4)).unwrap();
    assert_eq!(b.id, a.id.next());
}

#[test]
fn test_backwards_clock_stays_ordered() {
    let mut history = InMemoryRunHistory::new();
    let a = history.append_at(at(5, 0, 0), &report(4)).unwrap();
    let b = history.append_at(at(4, 0, 0), &report(2)).unwrap();
    assert!(b.id > a.id);
    assert_eq!(history.list().unwrap().last().unwrap().metrics, report(2));
}

#[test]
fn test_json_dir_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let history = JsonDirRunHistory::open(dir.path().join("retrain_history"));
    assert!(history.list().unwrap().is_empty());
}

#[test]
fn test_json_dir_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = JsonDirRunHistory::open(dir.path().join("retrain_history"));

    let run = history.append_at(at(12, 30, 15), &report(3)).unwrap();
    assert_eq!(run.id.to_string(), "20240501_123015");
    assert!(run.location.as_ref().unwrap().ends_with("metrics_20240501_123015.json"));

    let listed = history.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].metrics, report(3));
}

#[test]
fn test_json_dir_orders_by_timestamp_not_creation() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("retrain_history");
    std::fs::create_dir_all(&root).unwrap();

    // Written out of order, as a copy or restore might
    for name in ["metrics_20240102_000000.json", "metrics_20231231_235959.json", "metrics_20240101_120000.json"] {
        crate::io::write_json_atomic(&root.join(name), &report(4)).unwrap();
    }
    std::fs::write(root.join("notes.txt"), "ignored").unwrap();
    std::fs::write(root.join("metrics_20240103_000000.json.tmp"), "partial").unwrap();

    let history = JsonDirRunHistory::open(&root);
    let ids: Vec<String> = history.list().unwrap().iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["20231231_235959", "20240101_120000", "20240102_000000"]);
}

#[test]
fn test_json_dir_list_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = JsonDirRunHistory::open(dir.path());
    history.append_at(at(1, 0, 0), &report(4)).unwrap();
    history.append_at(at(2, 0, 0), &report(1)).unwrap();

    assert_eq!(history.list().unwrap(), history.list().unwrap());
    assert_eq!(history.len().unwrap(), 2);
}

#[test]
fn test_json_dir_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = JsonDirRunHistory::open(dir.path());
    let first = history.append_at(at(1, 0, 0), &report(4)).unwrap();
    let second = history.append_at(at(1, 0, 0), &report(0)).unwrap();

    assert_ne!(first.id, second.id);
    let runs = history.list().unwrap();
    assert_eq!(runs[0].metrics, report(4));
    assert_eq!(runs[1].metrics, report(0));
}
