//! Retraining pipeline
//!
//! Labels, features, dataset assembly and train/eval run in sequence. A
//! stage failure stops the pipeline with no history entry and the
//! published model untouched.

mod orchestrator;
mod pipeline;


pub use orchestrator::{RetrainOrchestrator, RetrainOutcome, RetrainTargets};
pub use pipeline::{EventLogSource, Stage, TrainingDataSource};
