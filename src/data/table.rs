//! Column-named tabular data
//!
//! Persisted as `{"columns": [...], "rows": [[...], ...]}` so column order
//! survives a round trip through disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::{read_json, write_json_atomic};

/// A single table cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value, treating NaN as missing
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Number(v) => v.is_nan(),
            Cell::Text(_) => false,
        }
    }

    /// Stable string form used as a join key
    pub fn key(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(v) if v.is_nan() => None,
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => Some(format!("{}", *v as i64)),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

#[derive(Serialize, Deserialize)]
struct TableRepr {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Row-major table with an ordered header
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<TableRepr> for Table {
    type Error = String;

    fn try_from(repr: TableRepr) -> std::result::Result<Self, Self::Error> {
        let width = repr.columns.len();
        if let Some(pos) = repr.rows.iter().position(|r| r.len() != width) {
            return Err(format!(
                "row {pos} has {} cells, header has {width}",
                repr.rows[pos].len()
            ));
        }
        Ok(Self { columns: repr.columns, rows: repr.rows })
    }
}

impl From<Table> for TableRepr {
    fn from(table: Table) -> Self {
        Self { columns: table.columns, rows: table.rows }
    }
}

impl Table {
    /// Empty table with the given header
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    /// Append a row; its width must match the header
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::InvalidInput(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a column that must exist
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::DataIntegrity(format!("required column '{name}' is missing")))
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |r| &r[idx])
    }

    /// Numeric view of a column; text cells are an integrity error
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let idx = self.require_column(name)?;
        self.column(idx)
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Text(s) => Err(Error::DataIntegrity(format!(
                    "column '{name}' row {row}: non-numeric value '{s}'"
                ))),
                other => Ok(other.as_f64()),
            })
            .collect()
    }

    /// New table holding only the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().filter_map(|&i| self.rows.get(i).cloned()).collect(),
        }
    }

    /// New table holding only the named columns, in the given order
    pub fn select_columns(&self, names: &[String]) -> Result<Table> {
        let idx: Vec<usize> =
            names.iter().map(|n| self.require_column(n)).collect::<Result<_>>()?;
        Ok(Table {
            columns: names.to_vec(),
            rows: self.rows.iter().map(|r| idx.iter().map(|&i| r[i].clone()).collect()).collect(),
        })
    }

    /// Append a column; `cells` must have one entry per row
    pub fn with_column(mut self, name: impl Into<String>, cells: Vec<Cell>) -> Result<Table> {
        if cells.len() != self.rows.len() {
            return Err(Error::InvalidInput(format!(
                "column has {} cells, table has {} rows",
                cells.len(),
                self.rows.len()
            )));
        }
        self.columns.push(name.into());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.push(cell);
        }
        Ok(self)
    }

    /// Load a table written by [`Table::save`]
    pub fn load(path: &Path) -> Result<Table> {
        if !path.exists() {
            return Err(Error::DataIntegrity(format!("dataset not found: {}", path.display())));
        }
        read_json(path)
    }

    /// Persist atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)
    }
}
