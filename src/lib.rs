//! # churnwatch
//!
//! Lifecycle management for a churn prediction model.
//!
//! - Per-feature baseline snapshots of the training data
//! - Data drift (feature mean shift) and concept drift (metric decay) checks
//! - Timestamped drift reports
//! - A fail-fast retraining pipeline that only publishes a model, a history
//!   entry and a dataset once every stage succeeds
//!
//! ## Example
//!
//! ```ignore
//! use churnwatch::config::LifecycleConfig;
//! use churnwatch::monitor::DriftReportGenerator;
//! use churnwatch::storage::{ArtifactStore, BaselineStore, JsonDirRunHistory};
//!
//! let layout = LifecycleConfig::default().layout();
//! let generator = DriftReportGenerator::new(
//!     BaselineStore::at(layout.baseline()),
//!     JsonDirRunHistory::open(layout.history_dir()),
//!     layout.reports_dir(),
//! );
//! let dataset = ArtifactStore::open(layout.models_dir()).current_dataset_path()?;
//! let generated = generator.generate_from(&dataset)?;
//! println!("{}", generated.report);
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod io;
pub mod monitor;
pub mod serving;
pub mod storage;
pub mod tracking;
pub mod train;

pub use error::{Error, Result};
