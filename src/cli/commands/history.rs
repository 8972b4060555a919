//! History command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::HistoryArgs;
use crate::error::Result;
use crate::eval::drift::{ConceptDriftDetector, ConceptDriftSignal};
use crate::storage::{JsonDirRunHistory, RunHistory};

pub fn run_history(args: HistoryArgs, level: LogLevel) -> Result<()> {
    let mut config = args.common.resolve()?;
    if let Some(threshold) = args.concept_threshold {
        config.drift.concept_threshold = threshold;
    }
    config.validate()?;

    let history = JsonDirRunHistory::open(config.layout().history_dir());
    let runs = history.list()?;

    if runs.is_empty() {
        log(level, LogLevel::Normal, "No retraining runs recorded yet.");
        return Ok(());
    }

    log(level, LogLevel::Normal, &format!("{:<17} {:>9} {:>9}", "RUN", "ACCURACY", "F1(1)"));
    for run in &runs {
        let f1 = run
            .metrics
            .class("1")
            .map_or_else(|| "-".to_string(), |m| format!("{:.4}", m.f1_score));
        log(level, LogLevel::Normal, &format!("{:<17} {:>9.4} {:>9}", run.id, run.metrics.accuracy, f1));
        if let Some(location) = &run.location {
            log(level, LogLevel::Verbose, &format!("  {}", location.display()));
        }
    }

    let signal = ConceptDriftDetector::new(config.drift.concept_threshold)?.detect(&runs)?;
    let line = match signal {
        ConceptDriftSignal::NoSignal => "Concept drift: not enough runs to compare".to_string(),
        ConceptDriftSignal::Alert(alert) => format!(
            "Concept drift: {} (accuracy drop {:+.4}, F1(1) drop {:+.4})",
            if alert.has_concept_drift { "DETECTED" } else { "none" },
            alert.accuracy_drop,
            alert.f1_class1_drop
        ),
    };
    log(level, LogLevel::Normal, &line);
    Ok(())
}
