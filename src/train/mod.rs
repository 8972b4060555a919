//! Churn model training
//!
//! - `split`: stratified, seeded train/test split
//! - `forest`: random-forest classifier
//! - `stage`: the train/evaluate step of the retraining pipeline

mod forest;
mod split;
mod stage;


pub use forest::{ClassWeight, ForestParams, RandomForest};
pub use split::{stratified_split, TrainTestSplit};
pub use stage::{
    TrainEvalOutcome, TrainEvalStage, DEFAULT_TEST_SIZE, FALSE_NEGATIVE_FILE, FALSE_POSITIVE_FILE,
    PREDICTIONS_FILE,
};
