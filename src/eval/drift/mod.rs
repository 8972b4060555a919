//! Drift Detection Module
//!
//! Two independent signals that the deployed churn model is going stale:
//! - Data drift: a feature's mean moved away from the baseline snapshot
//! - Concept drift: accuracy or positive-class F1 fell between the first
//!   and the latest retraining run

mod concept;
mod data;
mod types;

#[cfg(test)]
mod tests;

pub use concept::ConceptDriftDetector;
pub use data::{relative_change, DataDriftDetector};
pub use types::{
    ConceptDriftAlert, ConceptDriftSignal, DataDriftSummary, DriftedFeature,
    DEFAULT_CONCEPT_DROP_THRESHOLD, DEFAULT_DATA_DRIFT_THRESHOLD, MEAN_EPSILON,
};
