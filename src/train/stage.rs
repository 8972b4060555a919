//! Train and evaluate one churn model
//!
//! Splits the assembled dataset, fits the forest on the train side,
//! evaluates on the test side and writes everything the run produced into
//! one run-scoped directory.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::forest::{ForestParams, RandomForest};
use super::split::stratified_split;
use crate::data::{feature_columns, Cell, Table, ID_COLUMN, LABEL_COLUMN};
use crate::error::{Error, Result};
use crate::eval::classification::ClassificationReport;
use crate::storage::artifact::{FEATURE_COLUMNS_FILE, METRICS_FILE, MODEL_FILE};
use crate::storage::ModelArtifact;
use crate::tracking::{TrainingObserver, TrainingRecord};

pub const PREDICTIONS_FILE: &str = "model_predictions.json";
pub const FALSE_NEGATIVE_FILE: &str = "false_negative.json";
pub const FALSE_POSITIVE_FILE: &str = "false_positive.json";

/// Default test fraction of the stratified split
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// What a successful train/eval run produced
#[derive(Debug)]
pub struct TrainEvalOutcome {
    pub artifact: ModelArtifact,
    pub n_train: usize,
    pub n_test: usize,
    /// Run-scoped directory holding the model files and prediction slices
    pub output_dir: PathBuf,
    /// Id the tracker filed the run under, when tracking succeeded
    pub tracking_run: Option<String>,
}

impl TrainEvalOutcome {
    pub fn report(&self) -> &ClassificationReport {
        self.artifact.report()
    }
}

/// Feature matrix and labels pulled out of an assembled dataset
struct Design {
    columns: Vec<String>,
    x: Vec<Vec<f64>>,
    y: Vec<usize>,
}

/// Trains the churn classifier and evaluates it on a held-out split
pub struct TrainEvalStage {
    id_column: String,
    label_column: String,
    params: ForestParams,
    test_size: f64,
    observer: Option<Box<dyn TrainingObserver>>,
}

impl Default for TrainEvalStage {
    fn default() -> Self {
        Self::new(ForestParams::default(), DEFAULT_TEST_SIZE)
    }
}

impl TrainEvalStage {
    pub fn new(params: ForestParams, test_size: f64) -> Self {
        Self {
            id_column: ID_COLUMN.to_string(),
            label_column: LABEL_COLUMN.to_string(),
            params,
            test_size,
            observer: None,
        }
    }

    pub fn with_columns(mut self, id_column: impl Into<String>, label_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self.label_column = label_column.into();
        self
    }

    /// Report each completed run to `observer`
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    fn design(&self, dataset: &Table) -> Result<Design> {
        if dataset.is_empty() {
            return Err(Error::DataIntegrity("training dataset has no rows".to_string()));
        }
        dataset.require_column(&self.id_column)?;
        let label_idx = dataset.require_column(&self.label_column)?;
        let columns = feature_columns(dataset, &self.id_column, &self.label_column);
        if columns.is_empty() {
            return Err(Error::DataIntegrity("training dataset has no feature columns".to_string()));
        }
        let feature_idx: Vec<usize> =
            columns.iter().map(|c| dataset.require_column(c)).collect::<Result<_>>()?;

        let mut x = Vec::with_capacity(dataset.n_rows());
        let mut y = Vec::with_capacity(dataset.n_rows());
        for (r, row) in dataset.rows().iter().enumerate() {
            let values = feature_idx
                .iter()
                .zip(&columns)
                .map(|(&i, name)| {
                    row[i].as_f64().ok_or_else(|| {
                        Error::DataIntegrity(format!("feature '{name}' row {r}: missing or non-numeric value"))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            let label = match row[label_idx].as_f64() {
                Some(v) if v == 0.0 => 0,
                Some(v) if v == 1.0 => 1,
                _ => {
                    return Err(Error::DataIntegrity(format!(
                        "label '{}' row {r}: expected 0 or 1, got {:?}",
                        self.label_column, row[label_idx]
                    )))
                }
            };
            x.push(values);
            y.push(label);
        }
        Ok(Design { columns, x, y })
    }

    /// Train, evaluate and write all outputs under `output_dir`
    pub fn run(&mut self, dataset: &Table, output_dir: &Path) -> Result<TrainEvalOutcome> {
        let design = self.design(dataset)?;
        let split = stratified_split(&design.y, self.test_size, self.params.random_state)?;
        info!(
            rows = dataset.n_rows(),
            features = design.columns.len(),
            train = split.train.len(),
            test = split.test.len(),
            "training churn model"
        );

        let train_x: Vec<Vec<f64>> = split.train.iter().map(|&i| design.x[i].clone()).collect();
        let train_y: Vec<usize> = split.train.iter().map(|&i| design.y[i]).collect();
        let forest = RandomForest::fit(&train_x, &train_y, &self.params)?;

        let test_y: Vec<usize> = split.test.iter().map(|&i| design.y[i]).collect();
        let predicted = split
            .test
            .iter()
            .map(|&i| forest.predict(&design.x[i]))
            .collect::<Result<Vec<usize>>>()?;
        let report = ClassificationReport::from_predictions(&predicted, &test_y, 2);
        info!(accuracy = report.accuracy, "evaluated churn model");

        let artifact = ModelArtifact::new(forest, design.columns, report)?;
        artifact.save(output_dir)?;
        self.write_predictions(dataset, artifact.feature_columns(), &split.test, &test_y, &predicted, output_dir)?;

        let tracking_run = self.notify_observer(&artifact, output_dir);
        Ok(TrainEvalOutcome {
            artifact,
            n_train: split.train.len(),
            n_test: split.test.len(),
            output_dir: output_dir.to_path_buf(),
            tracking_run,
        })
    }

    /// Full test predictions plus the two error slices
    fn write_predictions(
        &self,
        dataset: &Table,
        columns: &[String],
        test_rows: &[usize],
        actual: &[usize],
        predicted: &[usize],
        output_dir: &Path,
    ) -> Result<()> {
        let features = dataset.select_rows(test_rows).select_columns(columns)?;
        let cells = |labels: &[usize]| labels.iter().map(|&l| Cell::from(l)).collect::<Vec<_>>();

        features
            .clone()
            .with_column("actual", cells(actual))?
            .with_column("predicted", cells(predicted))?
            .save(&output_dir.join(PREDICTIONS_FILE))?;

        for (file, want_true, want_pred) in [(FALSE_NEGATIVE_FILE, 1, 0), (FALSE_POSITIVE_FILE, 0, 1)] {
            let keep: Vec<usize> = (0..actual.len())
                .filter(|&i| actual[i] == want_true && predicted[i] == want_pred)
                .collect();
            let slice_true: Vec<usize> = keep.iter().map(|&i| actual[i]).collect();
            let slice_pred: Vec<usize> = keep.iter().map(|&i| predicted[i]).collect();
            features
                .select_rows(&keep)
                .with_column("true", cells(&slice_true))?
                .with_column("pred", cells(&slice_pred))?
                .save(&output_dir.join(file))?;
        }
        Ok(())
    }

    /// Tracking failures are logged, never returned
    fn notify_observer(&mut self, artifact: &ModelArtifact, output_dir: &Path) -> Option<String> {
        let observer = self.observer.as_mut()?;

        let mut params = self.params.as_params();
        params.push(("test_size".to_string(), self.test_size.to_string()));
        let artifact_paths: Vec<PathBuf> =
            [MODEL_FILE, FEATURE_COLUMNS_FILE, METRICS_FILE, PREDICTIONS_FILE, FALSE_NEGATIVE_FILE, FALSE_POSITIVE_FILE]
                .iter()
                .map(|f| output_dir.join(f))
                .collect();
        let record = TrainingRecord {
            params,
            metrics: artifact.report().flat_metrics(),
            artifacts: artifact_paths.iter().map(PathBuf::as_path).collect(),
        };

        match observer.on_training_complete(&record) {
            Ok(run_id) => {
                info!(run_id = %run_id, "tracked training run");
                Some(run_id)
            }
            Err(e) => {
                warn!(error = %e, "experiment tracking failed; continuing");
                None
            }
        }
    }
}
