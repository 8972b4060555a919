//! Event log to training table
//!
//! The fixed transformations feeding the retraining pipeline:
//! - `events`: JSON-lines behavioral log
//! - `labels`: churn label per user
//! - `features`: per-user aggregations
//! - `assemble`: features joined with labels
//! - `table`: the column-named table all stages exchange

mod assemble;
mod events;
mod features;
mod labels;
mod table;

pub use assemble::assemble_training_data;
pub use events::{load_events, whole_days, Event, CANCELLATION_PAGE};
pub use features::{aggregate_features, FEATURE_COLUMNS};
pub use labels::derive_labels;
pub use table::{Cell, Table};

/// Identifier column of every per-user table
pub const ID_COLUMN: &str = "userId";

/// Binary churn label column
pub const LABEL_COLUMN: &str = "churn";

/// Columns considered features: everything except identifier and label
pub fn feature_columns(table: &Table, id_column: &str, label_column: &str) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.as_str() != id_column && c.as_str() != label_column)
        .cloned()
        .collect()
}
