//! Experiment tracking
//!
//! Records each training run's hyperparameters, evaluation metrics and
//! artifact paths under a named experiment. Tracking observes training; it
//! never decides whether a run succeeded, so callers log tracker failures
//! and carry on.
//!
//! - **`ExperimentTracker`**: manages runs for one experiment
//! - **`TrackedRun`**: params, metrics and artifacts of one run
//! - **`TrackingBackend`**: persistence (JSON files, in-memory)

pub mod storage;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::storage::RunId;

pub use storage::{InMemoryBackend, JsonFileBackend, TrackingBackend};

/// Status of a tracked run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Active,
    Completed,
    Failed,
}

/// One training run as seen by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedRun {
    pub run_id: String,
    pub experiment_name: String,
    pub status: RunStatus,
    /// Hyperparameters, string-encoded
    pub params: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, f64>,
    pub artifacts: Vec<String>,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
}

impl TrackedRun {
    fn new(run_id: String, experiment_name: String) -> Self {
        Self {
            run_id,
            experiment_name,
            status: RunStatus::Active,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            artifacts: Vec::new(),
            start_time: Local::now(),
            end_time: None,
        }
    }
}

/// Errors from experiment tracking operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Run is not active: {0}")]
    RunNotActive(String),

    #[error("Tracking storage error: {0}")]
    Storage(#[from] crate::error::Error),
}

/// Result alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Everything a training stage reports about one finished run
#[derive(Debug, Clone, Default)]
pub struct TrainingRecord<'a> {
    pub params: Vec<(String, String)>,
    pub metrics: Vec<(String, f64)>,
    pub artifacts: Vec<&'a Path>,
}

/// Receives a record of every completed training run
pub trait TrainingObserver {
    /// Returns the id the observer filed the run under
    fn on_training_complete(&mut self, record: &TrainingRecord<'_>) -> Result<String>;
}

/// Experiment tracker
///
/// Manages runs under a single experiment name and persists finished runs
/// through a [`TrackingBackend`].
#[derive(Debug)]
pub struct ExperimentTracker<B: TrackingBackend> {
    experiment_name: String,
    backend: B,
    /// Runs not yet ended, held in memory
    active_runs: HashMap<String, TrackedRun>,
}

impl<B: TrackingBackend> ExperimentTracker<B> {
    pub fn new(experiment_name: impl Into<String>, backend: B) -> Self {
        Self { experiment_name: experiment_name.into(), backend, active_runs: HashMap::new() }
    }

    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Start a run; ids are timestamps, bumped past any id already in use
    pub fn start_run(&mut self) -> Result<String> {
        let mut id = RunId::now();
        while self.active_runs.contains_key(&id.to_string()) || self.backend.contains(&id.to_string())? {
            id = id.next();
        }
        let run_id = id.to_string();
        self.active_runs.insert(run_id.clone(), TrackedRun::new(run_id.clone(), self.experiment_name.clone()));
        Ok(run_id)
    }

    fn active(&mut self, run_id: &str) -> Result<&mut TrackedRun> {
        self.active_runs.get_mut(run_id).ok_or_else(|| TrackingError::RunNotActive(run_id.to_string()))
    }

    pub fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        self.active(run_id)?.params.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn log_metric(&mut self, run_id: &str, key: &str, value: f64) -> Result<()> {
        self.active(run_id)?.metrics.insert(key.to_string(), value);
        Ok(())
    }

    pub fn log_artifact(&mut self, run_id: &str, path: &Path) -> Result<()> {
        self.active(run_id)?.artifacts.push(path.display().to_string());
        Ok(())
    }

    /// End a run with the given status, persisting it to the backend
    pub fn end_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        let mut run =
            self.active_runs.remove(run_id).ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))?;
        run.status = status;
        run.end_time = Some(Local::now());
        self.backend.save_run(&run)?;
        Ok(())
    }

    /// Active runs first, then the backend
    pub fn get_run(&self, run_id: &str) -> Result<TrackedRun> {
        if let Some(run) = self.active_runs.get(run_id) {
            return Ok(run.clone());
        }
        self.backend.load_run(run_id)?.ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))
    }

    /// Persisted runs, ordered by id
    pub fn list_runs(&self) -> Result<Vec<TrackedRun>> {
        Ok(self.backend.list_runs()?)
    }
}

impl<B: TrackingBackend> TrainingObserver for ExperimentTracker<B> {
    fn on_training_complete(&mut self, record: &TrainingRecord<'_>) -> Result<String> {
        let run_id = self.start_run()?;
        for (key, value) in &record.params {
            self.log_param(&run_id, key, value)?;
        }
        for (key, value) in &record.metrics {
            self.log_metric(&run_id, key, *value)?;
        }
        for path in &record.artifacts {
            self.log_artifact(&run_id, path)?;
        }
        self.end_run(&run_id, RunStatus::Completed)?;
        Ok(run_id)
    }
}
