//! Baseline feature-statistics snapshot

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::eval::stats::FeatureStats;
use crate::io::{read_json, write_json_atomic};

/// The reference distribution that drift checks compare against.
///
/// Only an explicit recompute overwrites it; drift checks only read.
#[derive(Clone, Debug)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace any prior snapshot atomically
    pub fn save(&self, stats: &FeatureStats) -> Result<()> {
        write_json_atomic(&self.path, stats)?;
        info!(path = %self.path.display(), features = stats.len(), "saved baseline snapshot");
        Ok(())
    }

    /// Load the snapshot; `BaselineMissing` if none was ever saved
    pub fn load(&self) -> Result<FeatureStats> {
        if !self.exists() {
            return Err(Error::BaselineMissing { path: self.path.clone() });
        }
        read_json(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::stats::Stats;

    fn stats() -> FeatureStats {
        [
            ("num_songs".to_string(), Stats { mean: 812.25, std: 97.1, min: 3.0, max: 9632.0 }),
            ("thumbs_up_ratio".to_string(), Stats { mean: 0.8, std: 0.1, min: 0.0, max: 1.0 / 3.0 }),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_load_without_save_is_baseline_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = BaselineStore::at(dir.path().join("baseline_stats.json"));
        assert!(matches!(store.load(), Err(Error::BaselineMissing { .. })));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = BaselineStore::at(dir.path().join("data").join("baseline_stats.json"));
        store.save(&stats()).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.approx_eq(&stats(), 1e-9));
    }

    #[test]
    fn test_save_replaces_prior_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = BaselineStore::at(dir.path().join("baseline_stats.json"));
        store.save(&stats()).unwrap();

        let replacement: FeatureStats =
            [("x".to_string(), Stats { mean: 1.0, std: 0.0, min: 1.0, max: 1.0 })].into_iter().collect();
        store.save(&replacement).unwrap();

        assert_eq!(store.load().unwrap(), replacement);
    }
}
