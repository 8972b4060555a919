//! In-memory run history

use chrono::NaiveDateTime;

use super::traits::{next_run_id, RetrainRun, RunHistory};
use crate::error::Result;
use crate::eval::classification::ClassificationReport;

/// Run history held in a vector; nothing survives the process
#[derive(Clone, Debug, Default)]
pub struct InMemoryRunHistory {
    runs: Vec<RetrainRun>,
}

impl InMemoryRunHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunHistory for InMemoryRunHistory {
    fn append_at(&mut self, at: NaiveDateTime, metrics: &ClassificationReport) -> Result<RetrainRun> {
        let id = next_run_id(at, self.runs.last().map(|r| r.id));
        let run = RetrainRun { id, location: None, metrics: metrics.clone() };
        self.runs.push(run.clone());
        Ok(run)
    }

    fn list(&self) -> Result<Vec<RetrainRun>> {
        Ok(self.runs.clone())
    }
}
