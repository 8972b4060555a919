//! Directory-backed run history: one `metrics_<run id>.json` per run

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::run_id::RunId;
use super::traits::{next_run_id, RetrainRun, RunHistory};
use crate::error::Result;
use crate::eval::classification::ClassificationReport;
use crate::io::{read_json, write_json_atomic};

const FILE_PREFIX: &str = "metrics_";
const FILE_SUFFIX: &str = ".json";

/// Run history stored as one classification-report file per run
#[derive(Clone, Debug)]
pub struct JsonDirRunHistory {
    dir: PathBuf,
}

impl JsonDirRunHistory {
    /// Open (without creating) the history directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds run `id`
    pub fn path_for(&self, id: RunId) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{id}{FILE_SUFFIX}"))
    }

    /// Run ids on disk, oldest first. Unrelated files are ignored.
    fn run_ids(&self) -> Result<Vec<RunId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let parsed = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
                .and_then(|stem| stem.parse::<RunId>().ok());
            match parsed {
                Some(id) => ids.push(id),
                None => debug!(file = name, "ignoring non-run file in history"),
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl RunHistory for JsonDirRunHistory {
    fn append_at(&mut self, at: NaiveDateTime, metrics: &ClassificationReport) -> Result<RetrainRun> {
        let id = next_run_id(at, self.run_ids()?.last().copied());
        let path = self.path_for(id);
        write_json_atomic(&path, metrics)?;
        info!(run_id = %id, path = %path.display(), "recorded retrain run");
        Ok(RetrainRun { id, location: Some(path), metrics: metrics.clone() })
    }

    fn list(&self) -> Result<Vec<RetrainRun>> {
        self.run_ids()?
            .into_iter()
            .map(|id| {
                let path = self.path_for(id);
                let metrics = read_json(&path)?;
                Ok(RetrainRun { id, location: Some(path), metrics })
            })
            .collect()
    }

    fn len(&self) -> Result<usize> {
        Ok(self.run_ids()?.len())
    }
}
