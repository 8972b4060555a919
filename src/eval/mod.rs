//! Model evaluation and lifecycle checks
//!
//! - `stats`: per-feature summary statistics of a dataset
//! - `classification`: confusion matrix and sklearn-style classification report
//! - `drift`: data drift against a baseline, concept drift across retrain runs
//! - `retrain`: the fail-fast four-stage retraining pipeline

pub mod classification;
pub mod drift;
pub mod retrain;
pub mod stats;

pub use classification::{ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use drift::{ConceptDriftDetector, ConceptDriftSignal, DataDriftDetector, DriftedFeature};
pub use retrain::{RetrainOrchestrator, RetrainOutcome, RetrainTargets, Stage};
pub use stats::{FeatureStats, Stats, StatsComputer};
