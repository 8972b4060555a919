//! Drift report generation

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use super::types::{DriftReport, GeneratedReport};
use crate::data::Table;
use crate::error::{Error, Result};
use crate::eval::drift::{ConceptDriftDetector, DataDriftDetector, DataDriftSummary};
use crate::eval::stats::StatsComputer;
use crate::io::write_json_atomic;
use crate::storage::{BaselineStore, RunHistory, RunId};

const REPORT_PREFIX: &str = "drift_report_";

/// Runs both drift checks against the current dataset and persists the result.
///
/// Reads the baseline and the run history; never writes to either.
pub struct DriftReportGenerator<H: RunHistory> {
    stats: StatsComputer,
    data_detector: DataDriftDetector,
    concept_detector: ConceptDriftDetector,
    baseline: BaselineStore,
    history: H,
    reports_dir: PathBuf,
}

impl<H: RunHistory> DriftReportGenerator<H> {
    pub fn new(baseline: BaselineStore, history: H, reports_dir: impl AsRef<Path>) -> Self {
        Self {
            stats: StatsComputer::default(),
            data_detector: DataDriftDetector::default(),
            concept_detector: ConceptDriftDetector::default(),
            baseline,
            history,
            reports_dir: reports_dir.as_ref().to_path_buf(),
        }
    }

    pub fn with_stats_computer(mut self, stats: StatsComputer) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_detectors(mut self, data: DataDriftDetector, concept: ConceptDriftDetector) -> Self {
        self.data_detector = data;
        self.concept_detector = concept;
        self
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Build a report for `dataset` without persisting it.
    ///
    /// A dataset integrity failure aborts. A missing baseline does not: the
    /// report then carries no data-drift entries and
    /// `baseline_available: false`.
    pub fn generate_at(
        &self,
        dataset: &Table,
        timestamp: DateTime<Local>,
    ) -> Result<(DriftReport, Option<DataDriftSummary>)> {
        let current = self.stats.compute(dataset)?;

        let (data_drift_features, summary) = match self.baseline.load() {
            Ok(baseline) => {
                let drifted = self.data_detector.detect(&baseline, &current);
                let summary = DataDriftDetector::summarize(&baseline, &current, &drifted);
                (drifted, Some(summary))
            }
            Err(Error::BaselineMissing { path }) => {
                warn!(path = %path.display(), "no baseline snapshot; skipping data drift");
                (Vec::new(), None)
            }
            Err(e) => return Err(e),
        };

        let runs = self.history.list()?;
        let concept_drift = self.concept_detector.detect(&runs)?;

        let report = DriftReport {
            timestamp,
            num_rows: dataset.n_rows(),
            num_features: current.len(),
            data_drift_features,
            concept_drift,
            baseline_available: summary.is_some(),
        };
        Ok((report, summary))
    }

    /// Build a report stamped now and write it under a fresh name
    pub fn generate(&self, dataset: &Table) -> Result<GeneratedReport> {
        let (report, summary) = self.generate_at(dataset, Local::now())?;
        let path = self.persist(&report)?;
        info!(
            path = %path.display(),
            drifted = report.data_drift_features.len(),
            concept_drift = report.has_concept_drift(),
            "wrote drift report"
        );
        Ok(GeneratedReport { report, path, summary })
    }

    /// Load the dataset at `dataset_path`, then [`generate`](Self::generate)
    pub fn generate_from(&self, dataset_path: &Path) -> Result<GeneratedReport> {
        let dataset = Table::load(dataset_path)?;
        self.generate(&dataset)
    }

    /// Write `report` as `drift_report_<ts>.json`, suffixing `_N` if taken
    pub fn persist(&self, report: &DriftReport) -> Result<PathBuf> {
        let path = self.unused_path(RunId::at(report.timestamp.naive_local()));
        write_json_atomic(&path, report)?;
        Ok(path)
    }

    fn unused_path(&self, id: RunId) -> PathBuf {
        let base = format!("{REPORT_PREFIX}{id}");
        let mut path = self.reports_dir.join(format!("{base}.json"));
        let mut n = 1;
        while path.exists() {
            path = self.reports_dir.join(format!("{base}_{n}.json"));
            n += 1;
        }
        path
    }
}
