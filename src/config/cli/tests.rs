//! Tests for CLI argument parsing

use super::*;
use std::path::PathBuf;

#[test]
fn test_parse_baseline_command() {
    let cli = parse_args(["churnwatch", "baseline", "--root", "/srv/churn"]).unwrap();
    match cli.command {
        Command::Baseline(args) => {
            assert_eq!(args.common.root, Some(PathBuf::from("/srv/churn")));
            assert!(args.dataset.is_none());
        }
        _ => panic!("Expected Baseline command"),
    }
}

#[test]
fn test_parse_drift_with_overrides() {
    let cli = parse_args([
        "churnwatch",
        "drift",
        "--data-threshold",
        "0.25",
        "--concept-threshold",
        "0.15",
        "--format",
        "json",
    ])
    .unwrap();

    match cli.command {
        Command::Drift(args) => {
            assert_eq!(args.data_threshold, Some(0.25));
            assert_eq!(args.concept_threshold, Some(0.15));
            assert_eq!(args.format, OutputFormat::Json);
        }
        _ => panic!("Expected Drift command"),
    }
}

#[test]
fn test_parse_retrain_flags() {
    let cli = parse_args(["churnwatch", "-q", "retrain", "--n-estimators", "50", "--seed", "7", "--no-tracking"])
        .unwrap();
    assert!(cli.quiet);
    match cli.command {
        Command::Retrain(args) => {
            assert_eq!(args.n_estimators, Some(50));
            assert_eq!(args.seed, Some(7));
            assert!(args.no_tracking);
        }
        _ => panic!("Expected Retrain command"),
    }
}

#[test]
fn test_global_verbose_after_subcommand() {
    let cli = parse_args(["churnwatch", "history", "-v"]).unwrap();
    assert!(cli.verbose);
}

#[test]
fn test_predict_requires_input() {
    assert!(parse_args(["churnwatch", "predict"]).is_err());
    assert!(parse_args(["churnwatch", "predict", "--json", "{}", "--file", "x.json"]).is_err());
    assert!(parse_args(["churnwatch", "predict", "--json", "{}"]).is_ok());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(parse_args(["churnwatch", "drift", "--format", "yaml"]).is_err());
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("invalid".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}

#[test]
fn test_common_args_root_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifecycle.yaml");
    std::fs::write(&path, "root: /from/config\ndrift:\n  data_threshold: 0.4\n").unwrap();

    let common = CommonArgs { root: Some(PathBuf::from("/from/flag")), config: Some(path) };
    let config = common.resolve().unwrap();
    assert_eq!(config.root, PathBuf::from("/from/flag"));
    assert_eq!(config.drift.data_threshold, 0.4);
}
