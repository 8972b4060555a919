//! Retraining run history
//!
//! Append-only and ordered by [`RunId`], a parsed timestamp. Two backends:
//! - [`JsonDirRunHistory`]: one metrics file per run, durable
//! - [`InMemoryRunHistory`]: for tests and dry runs

mod in_memory;
mod json_dir;
mod run_id;
mod traits;

#[cfg(test)]
mod tests;

pub use in_memory::InMemoryRunHistory;
pub use json_dir::JsonDirRunHistory;
pub use run_id::{RunId, RUN_ID_FORMAT};
pub use traits::{RetrainRun, RunHistory};
