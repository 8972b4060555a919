//! Drift command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{DriftArgs, OutputFormat};
use crate::error::Result;
use crate::eval::drift::{ConceptDriftDetector, DataDriftDetector};
use crate::eval::stats::StatsComputer;
use crate::monitor::DriftReportGenerator;
use crate::storage::{ArtifactStore, BaselineStore, JsonDirRunHistory};

pub fn run_drift(args: DriftArgs, level: LogLevel) -> Result<()> {
    let mut config = args.common.resolve()?;
    if let Some(threshold) = args.data_threshold {
        config.drift.data_threshold = threshold;
    }
    if let Some(threshold) = args.concept_threshold {
        config.drift.concept_threshold = threshold;
    }
    config.validate()?;

    let layout = config.layout();
    let dataset_path = match args.dataset {
        Some(path) => path,
        None => ArtifactStore::open(layout.models_dir()).current_dataset_path()?,
    };

    let generator = DriftReportGenerator::new(
        BaselineStore::at(layout.baseline()),
        JsonDirRunHistory::open(layout.history_dir()),
        layout.reports_dir(),
    )
    .with_stats_computer(StatsComputer::new(&config.columns.id, &config.columns.label))
    .with_detectors(
        DataDriftDetector::new(config.drift.data_threshold)?,
        ConceptDriftDetector::new(config.drift.concept_threshold)?,
    );

    log(level, LogLevel::Verbose, &format!("Checking drift for: {}", dataset_path.display()));
    let generated = generator.generate_from(&dataset_path)?;

    match args.format {
        OutputFormat::Json => {
            if level != LogLevel::Quiet {
                println!("{}", serde_json::to_string_pretty(&generated.report)?);
            }
        }
        OutputFormat::Text => {
            log(level, LogLevel::Normal, &generated.report.to_string());
            if let Some(summary) = generated.summary {
                log(
                    level,
                    LogLevel::Verbose,
                    &format!(
                        "Compared {} features, skipped {} ({:.1}% drifted)",
                        summary.compared_features,
                        summary.skipped_features,
                        summary.drift_percentage()
                    ),
                );
            }
            log(level, LogLevel::Normal, &format!("Report saved to: {}", generated.path.display()));
        }
    }
    Ok(())
}
