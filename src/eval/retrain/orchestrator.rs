//! Fail-fast retraining pipeline with a single commit point

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::pipeline::{Stage, TrainingDataSource};
use crate::data::Table;
use crate::error::{Error, Result};
use crate::storage::{ArtifactStore, RetrainRun, RunHistory, RunId};
use crate::train::{TrainEvalOutcome, TrainEvalStage};

/// Per-attempt table names inside the work directory
const LABELS_FILE: &str = "labels.json";
const FEATURES_FILE: &str = "features.json";
const DATASET_FILE: &str = "training_data.json";
const MODEL_DIR: &str = "model";

/// Where the orchestrator writes its per-attempt scratch state
#[derive(Clone, Debug)]
pub struct RetrainTargets {
    /// Root for per-attempt directories
    pub work_dir: PathBuf,
}

/// Result of a successful retrain
#[derive(Debug)]
pub struct RetrainOutcome {
    pub run: RetrainRun,
    /// Model version that `CURRENT` now names
    pub version: RunId,
    /// Published dataset, stored inside the model version
    pub dataset: PathBuf,
    pub attempt_dir: PathBuf,
    pub train: TrainEvalOutcome,
}

/// Runs labels, features, dataset assembly and train/eval in order.
///
/// Any stage failure aborts with `PipelineStage`; nothing outside the
/// attempt's own work directory has been touched at that point. After all
/// four stages succeed the model and its dataset are staged as an
/// unpublished version, the run is appended to history, and switching the
/// `CURRENT` pointer is the last step. A failure before the pointer switch
/// discards the staged version.
pub struct RetrainOrchestrator<S: TrainingDataSource, H: RunHistory> {
    source: S,
    history: H,
    artifacts: ArtifactStore,
    stage: TrainEvalStage,
    targets: RetrainTargets,
}

/// Fresh per-attempt id whose work directory does not exist yet
fn attempt_id(work_dir: &Path) -> RunId {
    let mut id = RunId::now();
    while work_dir.join(id.to_string()).exists() {
        id = id.next();
    }
    id
}

impl<S: TrainingDataSource, H: RunHistory> RetrainOrchestrator<S, H> {
    pub fn new(
        source: S,
        history: H,
        artifacts: ArtifactStore,
        stage: TrainEvalStage,
        targets: RetrainTargets,
    ) -> Self {
        Self { source, history, artifacts, stage, targets }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn run(&mut self) -> Result<RetrainOutcome> {
        self.run_with_progress(|_| {})
    }

    /// Run the pipeline, calling `progress` as each stage starts
    pub fn run_with_progress(&mut self, mut progress: impl FnMut(Stage)) -> Result<RetrainOutcome> {
        let attempt = attempt_id(&self.targets.work_dir);
        let attempt_dir = self.targets.work_dir.join(attempt.to_string());
        info!(attempt = %attempt, dir = %attempt_dir.display(), "starting retrain");

        let (dataset, train) = self.run_stages(&attempt_dir, &mut progress).inspect_err(|e| {
            error!(attempt = %attempt, error = %e, "retrain aborted; history and published model unchanged");
        })?;

        let (run, dataset) = self.commit(attempt, &dataset, &train).inspect_err(|e| {
            error!(attempt = %attempt, error = %e, "retrain not committed; published model unchanged");
        })?;

        info!(
            run_id = %run.id,
            version = %attempt,
            accuracy = run.metrics.accuracy,
            "retrain complete"
        );
        Ok(RetrainOutcome { run, version: attempt, dataset, attempt_dir, train })
    }

    /// Stage the version, record the run, then publish
    fn commit(
        &mut self,
        attempt: RunId,
        dataset: &Table,
        train: &TrainEvalOutcome,
    ) -> Result<(RetrainRun, PathBuf)> {
        self.artifacts.stage(attempt, &train.artifact)?;
        let staged = self
            .artifacts
            .stage_dataset(attempt, dataset)
            .and_then(|path| Ok((self.history.append(train.report())?, path)));

        let (run, dataset_path) = match staged {
            Ok(staged) => staged,
            Err(e) => {
                if let Err(cleanup) = self.artifacts.discard(attempt) {
                    warn!(attempt = %attempt, error = %cleanup, "could not discard staged version");
                }
                return Err(e);
            }
        };

        self.artifacts.publish(attempt)?;
        Ok((run, dataset_path))
    }

    fn run_stages(
        &mut self,
        attempt_dir: &Path,
        progress: &mut impl FnMut(Stage),
    ) -> Result<(Table, TrainEvalOutcome)> {
        progress(Stage::Labels);
        let labels = self.source.labels().and_then(|t| save(t, &attempt_dir.join(LABELS_FILE)));
        let labels = labels.map_err(|e| Error::in_stage(Stage::Labels, e))?;

        progress(Stage::Features);
        let features = self.source.features().and_then(|t| save(t, &attempt_dir.join(FEATURES_FILE)));
        let features = features.map_err(|e| Error::in_stage(Stage::Features, e))?;

        progress(Stage::Dataset);
        let dataset = self
            .source
            .dataset(&features, &labels)
            .and_then(|t| save(t, &attempt_dir.join(DATASET_FILE)))
            .map_err(|e| Error::in_stage(Stage::Dataset, e))?;

        progress(Stage::TrainEval);
        let train = self
            .stage
            .run(&dataset, &attempt_dir.join(MODEL_DIR))
            .map_err(|e| Error::in_stage(Stage::TrainEval, e))?;

        Ok((dataset, train))
    }
}

fn save(table: Table, path: &Path) -> Result<Table> {
    table.save(path)?;
    Ok(table)
}
