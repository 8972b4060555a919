//! Run history trait definitions

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::run_id::RunId;
use crate::error::Result;
use crate::eval::classification::ClassificationReport;

/// One retraining run's evaluation snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetrainRun {
    pub id: RunId,
    /// Where the run is stored, if it lives on disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<std::path::PathBuf>,
    pub metrics: ClassificationReport,
}

impl RetrainRun {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.id.timestamp()
    }
}

/// Append-only, chronologically ordered run history.
///
/// Entries are never modified or removed. Ids handed out by `append_at`
/// are strictly increasing, so `list()` order is the append order.
pub trait RunHistory {
    /// Record `metrics` as a run at `at`.
    ///
    /// If `at` is not strictly after the latest run, the run gets the first
    /// free second after the latest run instead.
    fn append_at(&mut self, at: NaiveDateTime, metrics: &ClassificationReport) -> Result<RetrainRun>;

    /// All runs, oldest first
    fn list(&self) -> Result<Vec<RetrainRun>>;

    /// Record `metrics` as a run timestamped now
    fn append(&mut self, metrics: &ClassificationReport) -> Result<RetrainRun> {
        self.append_at(RunId::now().timestamp(), metrics)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn latest(&self) -> Result<Option<RetrainRun>> {
        Ok(self.list()?.pop())
    }
}

/// Id for a run requested at `at`, given the latest existing id
pub(crate) fn next_run_id(at: NaiveDateTime, latest: Option<RunId>) -> RunId {
    let wanted = RunId::at(at);
    match latest {
        Some(latest) if wanted <= latest => latest.next(),
        _ => wanted,
    }
}
