//! Tracking storage backends
//!
//! The `TrackingBackend` trait plus a JSON-file implementation that keeps
//! one `<run id>.json` per run under `mlruns/<experiment>/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::TrackedRun;
use crate::error::Result;
use crate::io::{read_json, write_json_atomic};

/// Persists and retrieves finished runs
pub trait TrackingBackend {
    fn save_run(&mut self, run: &TrackedRun) -> Result<()>;

    /// `None` when no run has that id
    fn load_run(&self, run_id: &str) -> Result<Option<TrackedRun>>;

    /// All stored runs, ordered by id
    fn list_runs(&self) -> Result<Vec<TrackedRun>>;

    fn contains(&self, run_id: &str) -> Result<bool> {
        Ok(self.load_run(run_id)?.is_some())
    }
}

/// One JSON file per run in a directory
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// The directory is created on first save
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Backend for `experiment` under an `mlruns` root
    pub fn for_experiment(root: impl AsRef<Path>, experiment: &str) -> Self {
        Self::new(root.as_ref().join(experiment))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        self.dir.join(format!("{run_id}.json"))
    }
}

impl TrackingBackend for JsonFileBackend {
    fn save_run(&mut self, run: &TrackedRun) -> Result<()> {
        write_json_atomic(&self.run_path(&run.run_id), run)
    }

    fn load_run(&self, run_id: &str) -> Result<Option<TrackedRun>> {
        let path = self.run_path(run_id);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn contains(&self, run_id: &str) -> Result<bool> {
        Ok(self.run_path(run_id).is_file())
    }

    fn list_runs(&self) -> Result<Vec<TrackedRun>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut runs: Vec<TrackedRun> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                runs.push(read_json(&path)?);
            }
        }
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(runs)
    }
}

/// Keeps runs in memory; no persistence
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    runs: BTreeMap<String, TrackedRun>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackingBackend for InMemoryBackend {
    fn save_run(&mut self, run: &TrackedRun) -> Result<()> {
        self.runs.insert(run.run_id.clone(), run.clone());
        Ok(())
    }

    fn load_run(&self, run_id: &str) -> Result<Option<TrackedRun>> {
        Ok(self.runs.get(run_id).cloned())
    }

    fn list_runs(&self) -> Result<Vec<TrackedRun>> {
        Ok(self.runs.values().cloned().collect())
    }
}
