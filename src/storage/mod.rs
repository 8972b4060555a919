//! Persistent lifecycle state
//!
//! Everything that outlives a single run lives here: the baseline snapshot,
//! the retraining run history and the versioned model artifacts. All writes
//! go through temp-file-plus-rename.

pub mod artifact;
pub mod baseline;
pub mod history;

pub use artifact::{ArtifactStore, ModelArtifact};
pub use baseline::BaselineStore;
pub use history::{InMemoryRunHistory, JsonDirRunHistory, RetrainRun, RunHistory, RunId};
