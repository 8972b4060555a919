//! Pipeline stages and the data they consume

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::{aggregate_features, assemble_training_data, derive_labels, load_events, Event, Table};
use crate::error::Result;

/// The four retraining stages, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Labels,
    Features,
    Dataset,
    TrainEval,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Labels, Stage::Features, Stage::Dataset, Stage::TrainEval];

    /// 1-based position in the pipeline
    pub fn number(self) -> usize {
        match self {
            Self::Labels => 1,
            Self::Features => 2,
            Self::Dataset => 3,
            Self::TrainEval => 4,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Labels => "Creating labels",
            Self::Features => "Creating features",
            Self::Dataset => "Building training dataset",
            Self::TrainEval => "Training and evaluating model",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Labels => "labels",
            Self::Features => "features",
            Self::Dataset => "dataset",
            Self::TrainEval => "train_eval",
        };
        f.write_str(name)
    }
}

/// Produces the tables of the first three stages
pub trait TrainingDataSource {
    fn labels(&mut self) -> Result<Table>;

    fn features(&mut self) -> Result<Table>;

    fn dataset(&mut self, features: &Table, labels: &Table) -> Result<Table> {
        assemble_training_data(features, labels)
    }
}

/// Labels and features derived from a JSON-lines event log
#[derive(Debug)]
pub struct EventLogSource {
    path: PathBuf,
    events: Option<Vec<Event>>,
}

impl EventLogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), events: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed once, then reused by later stages
    fn events(&mut self) -> Result<&[Event]> {
        if self.events.is_none() {
            self.events = Some(load_events(&self.path)?);
        }
        Ok(self.events.as_deref().unwrap_or_default())
    }
}

impl TrainingDataSource for EventLogSource {
    fn labels(&mut self) -> Result<Table> {
        derive_labels(self.events()?)
    }

    fn features(&mut self) -> Result<Table> {
        aggregate_features(self.events()?)
    }
}
