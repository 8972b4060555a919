//! Drift report document

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::eval::drift::{ConceptDriftSignal, DataDriftSummary, DriftedFeature};

/// One drift check, as persisted under `monitoring_reports/`.
///
/// Written once and never modified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// RFC 3339 with the local offset
    pub timestamp: DateTime<Local>,
    pub num_rows: usize,
    pub num_features: usize,
    pub data_drift_features: Vec<DriftedFeature>,
    /// `null` until history holds two runs
    pub concept_drift: ConceptDriftSignal,
    /// False when no baseline snapshot existed; data drift was not checked
    pub baseline_available: bool,
}

impl DriftReport {
    pub fn has_data_drift(&self) -> bool {
        !self.data_drift_features.is_empty()
    }

    pub fn has_concept_drift(&self) -> bool {
        self.concept_drift.has_concept_drift()
    }
}

/// Console summary of a report
impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Drift report {}", self.timestamp.to_rfc3339())?;
        writeln!(f, "  Rows: {}  Features: {}", self.num_rows, self.num_features)?;

        if !self.baseline_available {
            writeln!(f, "  Data drift: not checked (no baseline snapshot)")?;
        } else if self.data_drift_features.is_empty() {
            writeln!(f, "  Data drift: none")?;
        } else {
            writeln!(f, "  Data drift in {} feature(s):", self.data_drift_features.len())?;
            for d in &self.data_drift_features {
                writeln!(
                    f,
                    "    {}: baseline={:.4}, current={:.4}, change={:.2}%",
                    d.feature,
                    d.baseline_mean,
                    d.current_mean,
                    d.relative_change * 100.0
                )?;
            }
        }

        match self.concept_drift.alert() {
            None => writeln!(f, "  Concept drift: not enough retrain history (need 2 runs)"),
            Some(a) => writeln!(
                f,
                "  Concept drift: {} (accuracy {:.4} -> {:.4}, class-1 F1 {:.4} -> {:.4})",
                if a.has_concept_drift { "DETECTED" } else { "none" },
                a.baseline_accuracy,
                a.latest_accuracy,
                a.baseline_f1_class1,
                a.latest_f1_class1
            ),
        }
    }
}

/// A persisted report and where it went
#[derive(Clone, Debug)]
pub struct GeneratedReport {
    pub report: DriftReport,
    pub path: std::path::PathBuf,
    /// Present when a baseline was available
    pub summary: Option<DataDriftSummary>,
}
