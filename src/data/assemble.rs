//! Training dataset assembly

use std::collections::HashMap;

use super::table::{Cell, Table};
use super::{ID_COLUMN, LABEL_COLUMN};
use crate::error::{Error, Result};

/// Left-join `features` with `labels` on the identifier column.
///
/// Feature rows keep their order; users without a label get a null label.
pub fn assemble_training_data(features: &Table, labels: &Table) -> Result<Table> {
    let feature_id = features.require_column(ID_COLUMN)?;
    let label_id = labels.require_column(ID_COLUMN)?;
    let label_idx = labels.require_column(LABEL_COLUMN)?;

    if features.column_index(LABEL_COLUMN).is_some() {
        return Err(Error::DataIntegrity(format!(
            "feature table already has a '{LABEL_COLUMN}' column"
        )));
    }

    let mut by_user: HashMap<String, Cell> = HashMap::with_capacity(labels.n_rows());
    for row in labels.rows() {
        if let Some(key) = row[label_id].key() {
            by_user.entry(key).or_insert_with(|| row[label_idx].clone());
        }
    }

    let label_cells = features
        .column(feature_id)
        .map(|id| id.key().and_then(|k| by_user.get(&k).cloned()).unwrap_or(Cell::Null))
        .collect();

    features.clone().with_column(LABEL_COLUMN, label_cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_join_keeps_feature_order() {
        let mut features = Table::new([ID_COLUMN, "x"]);
        features.push_row(vec![Cell::from("2"), Cell::from(5.0)]).unwrap();
        features.push_row(vec![Cell::from("1"), Cell::from(6.0)]).unwrap();
        features.push_row(vec![Cell::from("3"), Cell::from(7.0)]).unwrap();

        let mut labels = Table::new([ID_COLUMN, LABEL_COLUMN]);
        labels.push_row(vec![Cell::from(1.0), Cell::from(1.0)]).unwrap();
        labels.push_row(vec![Cell::from("2"), Cell::from(0.0)]).unwrap();

        let joined = assemble_training_data(&features, &labels).unwrap();
        assert_eq!(joined.columns(), &[ID_COLUMN, "x", LABEL_COLUMN]);
        assert_eq!(joined.rows()[0][2], Cell::from(0.0));
        assert_eq!(joined.rows()[1][2], Cell::from(1.0));
        assert_eq!(joined.rows()[2][2], Cell::Null);
    }

    #[test]
    fn test_missing_label_column_is_integrity_error() {
        let features = Table::new([ID_COLUMN, "x"]);
        let labels = Table::new([ID_COLUMN]);
        assert!(matches!(
            assemble_training_data(&features, &labels),
            Err(Error::DataIntegrity(_))
        ));
    }
}
