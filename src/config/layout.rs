//! File layout under the data root

use std::path::{Path, PathBuf};

/// Every path the lifecycle reads or writes, derived from one root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// JSON-lines behavioral event log
    pub fn events(&self) -> PathBuf {
        self.root.join("data").join("customer_churn_mini.json")
    }

    pub fn baseline(&self) -> PathBuf {
        self.root.join("data").join("baseline_stats.json")
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join("retrain_history")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.join("retrain_work")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join("models")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("monitoring_reports")
    }

    pub fn tracking_dir(&self) -> PathBuf {
        self.root.join("mlruns")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_root() {
        let layout = Layout::new("/srv/churn");
        assert_eq!(layout.baseline(), PathBuf::from("/srv/churn/data/baseline_stats.json"));
        assert_eq!(layout.history_dir(), PathBuf::from("/srv/churn/retrain_history"));
        assert!(layout.models_dir().starts_with(layout.root()));
    }
}
