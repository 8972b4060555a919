//! Reloadable model handle

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::storage::{ArtifactStore, ModelArtifact, RunId};

/// Response of one prediction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1 = predicted to churn
    pub churn_prediction: u8,
    /// Probability of churn in [0, 1]
    pub churn_probability: f64,
}

/// The published model, loaded once and swapped explicitly
#[derive(Debug)]
pub struct ModelHandle {
    store: ArtifactStore,
    version: RunId,
    artifact: ModelArtifact,
}

impl ModelHandle {
    /// Load whatever `CURRENT` names under `models_dir`
    pub fn open<P: AsRef<Path>>(models_dir: P) -> Result<Self> {
        let store = ArtifactStore::open(models_dir);
        let (version, artifact) = Self::load_published(&store)?;
        info!(version = %version, features = artifact.feature_columns().len(), "loaded model");
        Ok(Self { store, version, artifact })
    }

    fn load_published(store: &ArtifactStore) -> Result<(RunId, ModelArtifact)> {
        let version = store
            .current_id()?
            .ok_or_else(|| Error::ArtifactMissing { path: store.dir().to_path_buf() })?;
        let artifact = ModelArtifact::load(&store.version_dir(version))?;
        Ok((version, artifact))
    }

    pub fn version(&self) -> RunId {
        self.version
    }

    /// Input order expected by [`predict`](Self::predict)
    pub fn feature_columns(&self) -> &[String] {
        self.artifact.feature_columns()
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Predict from values given in feature-column order
    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        if features.len() != self.feature_columns().len() {
            return Err(Error::InvalidInput(format!(
                "expected {} feature values ({}), got {}",
                self.feature_columns().len(),
                self.feature_columns().join(", "),
                features.len()
            )));
        }
        let forest = self.artifact.forest();
        let churn_probability = forest.predict_proba(features)?;
        Ok(Prediction {
            churn_prediction: u8::from(churn_probability > 0.5),
            churn_probability,
        })
    }

    /// Predict from a name -> value map; extra names are ignored
    pub fn predict_named(&self, features: &HashMap<String, f64>) -> Result<Prediction> {
        let row = self
            .feature_columns()
            .iter()
            .map(|name| {
                features
                    .get(name)
                    .copied()
                    .ok_or_else(|| Error::InvalidInput(format!("missing feature '{name}'")))
            })
            .collect::<Result<Vec<f64>>>()?;
        self.predict(&row)
    }

    /// Re-read `CURRENT`; returns whether a different version is now loaded.
    ///
    /// On failure the handle keeps serving the version it had.
    pub fn reload(&mut self) -> Result<bool> {
        let (version, artifact) = Self::load_published(&self.store)?;
        if version == self.version {
            return Ok(false);
        }
        info!(from = %self.version, to = %version, "reloaded model");
        self.version = version;
        self.artifact = artifact;
        Ok(true)
    }
}
