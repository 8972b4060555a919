//! Per-feature summary statistics
//!
//! [`FeatureStats`] keeps features in insertion order; drift output follows
//! that order, so it survives serialization unchanged.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::data::{feature_columns, Table, ID_COLUMN, LABEL_COLUMN};
use crate::error::{Error, Result};

/// Summary of one numeric feature
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Stats {
    /// Summarize non-null values; `None` when there are none
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        // Sample std (n - 1); a single observation has no spread
        let std = if values.len() > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { mean, std, min, max })
    }

    fn approx_eq(&self, other: &Stats, tol: f64) -> bool {
        (self.mean - other.mean).abs() <= tol
            && (self.std - other.std).abs() <= tol
            && (self.min - other.min).abs() <= tol
            && (self.max - other.max).abs() <= tol
    }
}

/// Feature name -> [`Stats`], in insertion order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureStats {
    entries: Vec<(String, Stats)>,
}

impl FeatureStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced feature keeps its position
    pub fn insert(&mut self, feature: impl Into<String>, stats: Stats) {
        let feature = feature.into();
        match self.entries.iter_mut().find(|(name, _)| *name == feature) {
            Some(entry) => entry.1 = stats,
            None => self.entries.push((feature, stats)),
        }
    }

    pub fn get(&self, feature: &str) -> Option<&Stats> {
        self.entries.iter().find(|(name, _)| name == feature).map(|(_, s)| s)
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.get(feature).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stats)> + '_ {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Same features in the same order, every field within `tol`
    pub fn approx_eq(&self, other: &FeatureStats, tol: f64) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((a, sa), (b, sb))| a == b && sa.approx_eq(sb, tol))
    }
}

impl FromIterator<(String, Stats)> for FeatureStats {
    fn from_iter<I: IntoIterator<Item = (String, Stats)>>(iter: I) -> Self {
        let mut stats = FeatureStats::new();
        for (name, s) in iter {
            stats.insert(name, s);
        }
        stats
    }
}

impl Serialize for FeatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, stats) in &self.entries {
            map.serialize_entry(name, stats)?;
        }
        map.end()
    }
}

struct FeatureStatsVisitor;

impl<'de> Visitor<'de> for FeatureStatsVisitor {
    type Value = FeatureStats;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of feature name to {mean, std, min, max}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<FeatureStats, A::Error> {
        let mut stats = FeatureStats::new();
        while let Some((name, s)) = access.next_entry::<String, Stats>()? {
            if stats.contains(&name) {
                return Err(serde::de::Error::custom(format!("duplicate feature '{name}'")));
            }
            stats.entries.push((name, s));
        }
        Ok(stats)
    }
}

impl<'de> Deserialize<'de> for FeatureStats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(FeatureStatsVisitor)
    }
}

/// Computes [`FeatureStats`] over every column except identifier and label
#[derive(Clone, Debug)]
pub struct StatsComputer {
    id_column: String,
    label_column: String,
}

impl Default for StatsComputer {
    fn default() -> Self {
        Self::new(ID_COLUMN, LABEL_COLUMN)
    }
}

impl StatsComputer {
    pub fn new(id_column: impl Into<String>, label_column: impl Into<String>) -> Self {
        Self { id_column: id_column.into(), label_column: label_column.into() }
    }

    /// Feature columns of `table`, in table order
    pub fn feature_columns(&self, table: &Table) -> Vec<String> {
        feature_columns(table, &self.id_column, &self.label_column)
    }

    /// Summarize every feature over its non-null rows.
    ///
    /// Fails with `DataIntegrity` for an empty table, a missing id or label
    /// column, a table without features, an all-null feature, or a
    /// non-numeric value.
    pub fn compute(&self, table: &Table) -> Result<FeatureStats> {
        if table.is_empty() {
            return Err(Error::DataIntegrity("dataset has no rows".to_string()));
        }
        table.require_column(&self.id_column)?;
        table.require_column(&self.label_column)?;
        let features = self.feature_columns(table);
        if features.is_empty() {
            return Err(Error::DataIntegrity("dataset has no feature columns".to_string()));
        }

        let mut stats = FeatureStats::new();
        for feature in features {
            let values: Vec<f64> = table.numeric_column(&feature)?.into_iter().flatten().collect();
            let summary = Stats::from_values(&values).ok_or_else(|| {
                Error::DataIntegrity(format!("feature '{feature}' has no non-null values"))
            })?;
            stats.insert(feature, summary);
        }
        Ok(stats)
    }
}
