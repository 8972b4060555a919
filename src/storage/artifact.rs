//! Versioned model artifacts with an atomically switched `CURRENT` pointer
//!
//! Layout under the models directory:
//! - `versions/<run id>/model.json`
//! - `versions/<run id>/feature_columns.json`
//! - `versions/<run id>/last_metrics.json`
//! - `versions/<run id>/training_data.json`: the dataset the model was fit on
//! - `CURRENT`: the published version id
//!
//! A version directory is complete before `CURRENT` can name it, so a
//! reader following the pointer always sees a whole artifact and the
//! dataset that belongs to it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::history::RunId;
use crate::data::Table;
use crate::error::{Error, Result};
use crate::eval::classification::ClassificationReport;
use crate::io::{read_json, write_atomic, write_json_atomic};
use crate::train::RandomForest;

pub const MODEL_FILE: &str = "model.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";
pub const METRICS_FILE: &str = "last_metrics.json";
pub const DATASET_FILE: &str = "training_data.json";
const CURRENT_FILE: &str = "CURRENT";
const VERSIONS_DIR: &str = "versions";

/// A trained forest bound to the feature order it was trained on
#[derive(Clone, Debug, PartialEq)]
pub struct ModelArtifact {
    forest: RandomForest,
    feature_columns: Vec<String>,
    report: ClassificationReport,
}

impl ModelArtifact {
    /// Bind a forest to its feature schema; widths must agree
    pub fn new(
        forest: RandomForest,
        feature_columns: Vec<String>,
        report: ClassificationReport,
    ) -> Result<Self> {
        if forest.n_features() != feature_columns.len() {
            return Err(Error::ArtifactMismatch {
                expected: forest.n_features(),
                actual: feature_columns.len(),
            });
        }
        Ok(Self { forest, feature_columns, report })
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn report(&self) -> &ClassificationReport {
        &self.report
    }

    /// Write the three artifact files into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        write_json_atomic(&dir.join(MODEL_FILE), &self.forest)?;
        write_json_atomic(&dir.join(FEATURE_COLUMNS_FILE), &self.feature_columns)?;
        write_json_atomic(&dir.join(METRICS_FILE), &self.report)?;
        Ok(())
    }

    /// Read an artifact back from `dir`, re-checking the width contract
    pub fn load(dir: &Path) -> Result<Self> {
        let model_path = dir.join(MODEL_FILE);
        if !model_path.is_file() {
            return Err(Error::ArtifactMissing { path: model_path });
        }
        let forest: RandomForest = read_json(&model_path)?;
        forest.validate()?;
        let feature_columns = read_json(&dir.join(FEATURE_COLUMNS_FILE))?;
        let report = read_json(&dir.join(METRICS_FILE))?;
        Self::new(forest, feature_columns, report)
    }
}

/// Model versions plus the published pointer
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn version_dir(&self, id: RunId) -> PathBuf {
        self.dir.join(VERSIONS_DIR).join(id.to_string())
    }

    fn pointer_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    /// Write `artifact` as version `id` without publishing it
    pub fn stage(&self, id: RunId, artifact: &ModelArtifact) -> Result<PathBuf> {
        let dir = self.version_dir(id);
        if dir.exists() {
            return Err(Error::InvalidInput(format!("model version {id} already exists")));
        }
        artifact.save(&dir)?;
        info!(version = %id, path = %dir.display(), "staged model version");
        Ok(dir)
    }

    /// Store the training dataset alongside staged version `id`
    pub fn stage_dataset(&self, id: RunId, dataset: &Table) -> Result<PathBuf> {
        let dir = self.version_dir(id);
        if !dir.join(MODEL_FILE).is_file() {
            return Err(Error::ArtifactMissing { path: dir });
        }
        let path = dir.join(DATASET_FILE);
        dataset.save(&path)?;
        Ok(path)
    }

    /// Remove an unpublished version. The published one is never removed.
    pub fn discard(&self, id: RunId) -> Result<()> {
        if self.current_id()? == Some(id) {
            return Err(Error::InvalidInput(format!("model version {id} is published")));
        }
        let dir = self.version_dir(id);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            warn!(version = %id, "discarded staged model version");
        }
        Ok(())
    }

    /// Point `CURRENT` at a staged version
    pub fn publish(&self, id: RunId) -> Result<()> {
        let dir = self.version_dir(id);
        if !dir.join(MODEL_FILE).is_file() {
            return Err(Error::ArtifactMissing { path: dir });
        }
        write_atomic(&self.pointer_path(), id.to_string().as_bytes())?;
        info!(version = %id, "published model version");
        Ok(())
    }

    /// Published version id, if any
    pub fn current_id(&self) -> Result<Option<RunId>> {
        let pointer = self.pointer_path();
        if !pointer.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&pointer)?;
        content.trim().parse().map(Some)
    }

    /// The published artifact; `ArtifactMissing` before the first publish
    pub fn load_current(&self) -> Result<ModelArtifact> {
        let id = self
            .current_id()?
            .ok_or_else(|| Error::ArtifactMissing { path: self.pointer_path() })?;
        ModelArtifact::load(&self.version_dir(id))
    }

    /// Dataset of the published version; `ArtifactMissing` before the first publish
    pub fn current_dataset_path(&self) -> Result<PathBuf> {
        let id = self
            .current_id()?
            .ok_or_else(|| Error::ArtifactMissing { path: self.pointer_path() })?;
        let path = self.version_dir(id).join(DATASET_FILE);
        if !path.is_file() {
            return Err(Error::ArtifactMissing { path });
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;
    use crate::train::ForestParams;

    fn artifact() -> ModelArtifact {
        let x: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64, (i % 2) as f64]).collect();
        let y: Vec<usize> = (0..12).map(|i| usize::from(i >= 6)).collect();
        let params = ForestParams { n_estimators: 5, ..ForestParams::default() };
        let forest = RandomForest::fit(&x, &y, &params).unwrap();
        let report = ClassificationReport::from_predictions(&y, &y, 2);
        ModelArtifact::new(forest, vec!["a".to_string(), "b".to_string()], report).unwrap()
    }

    fn id(s: &str) -> RunId {
        s.parse().unwrap()
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let good = artifact();
        let err = ModelArtifact::new(good.forest.clone(), vec!["a".to_string()], good.report.clone())
            .unwrap_err();
        assert!(matches!(err, Error::ArtifactMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_load_current_before_publish_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        assert!(store.current_id().unwrap().is_none());
        assert!(matches!(store.load_current(), Err(Error::ArtifactMissing { .. })));
    }

    #[test]
    fn test_stage_does_not_publish() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        store.stage(id("20240101_000000"), &artifact()).unwrap();
        assert!(store.current_id().unwrap().is_none());
    }

    #[test]
    fn test_publish_switches_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        let art = artifact();

        store.stage(id("20240101_000000"), &art).unwrap();
        store.publish(id("20240101_000000")).unwrap();
        store.stage(id("20240102_000000"), &art).unwrap();
        assert_eq!(store.current_id().unwrap(), Some(id("20240101_000000")));

        store.publish(id("20240102_000000")).unwrap();
        assert_eq!(store.current_id().unwrap(), Some(id("20240102_000000")));
        assert_eq!(store.load_current().unwrap(), art);
    }

    #[test]
    fn test_publish_unstaged_version_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        assert!(matches!(store.publish(id("20240101_000000")), Err(Error::ArtifactMissing { .. })));
    }

    #[test]
    fn test_stage_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        store.stage(id("20240101_000000"), &artifact()).unwrap();
        assert!(store.stage(id("20240101_000000"), &artifact()).is_err());
    }

    fn dataset() -> Table {
        let mut t = Table::new(["userId", "a", "b", "churn"]);
        t.push_row(vec![Cell::from("u1"), Cell::from(1.0), Cell::from(0.0), Cell::from(1.0)]).unwrap();
        t
    }

    #[test]
    fn test_dataset_follows_published_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        let v1 = id("20240101_000000");
        store.stage(v1, &artifact()).unwrap();
        store.stage_dataset(v1, &dataset()).unwrap();

        // Staged but unpublished: not visible yet
        assert!(matches!(store.current_dataset_path(), Err(Error::ArtifactMissing { .. })));

        store.publish(v1).unwrap();
        let path = store.current_dataset_path().unwrap();
        assert!(path.starts_with(store.version_dir(v1)));
        assert_eq!(Table::load(&path).unwrap(), dataset());
    }

    #[test]
    fn test_stage_dataset_requires_staged_model() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        let err = store.stage_dataset(id("20240101_000000"), &dataset()).unwrap_err();
        assert!(matches!(err, Error::ArtifactMissing { .. }));
    }

    #[test]
    fn test_discard_removes_staged_but_not_published() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path());
        let (v1, v2) = (id("20240101_000000"), id("20240102_000000"));
        store.stage(v1, &artifact()).unwrap();
        store.publish(v1).unwrap();
        store.stage(v2, &artifact()).unwrap();

        store.discard(v2).unwrap();
        assert!(!store.version_dir(v2).exists());
        assert!(store.discard(v1).is_err());
        assert!(store.version_dir(v1).join(MODEL_FILE).is_file());
    }

    #[test]
    fn test_load_rejects_tampered_schema() {
        let dir = tempfile::tempdir().unwrap();
        let art = artifact();
        art.save(dir.path()).unwrap();
        write_json_atomic(&dir.path().join(FEATURE_COLUMNS_FILE), &vec!["only_one"]).unwrap();
        assert!(matches!(ModelArtifact::load(dir.path()), Err(Error::ArtifactMismatch { .. })));
    }
}
