//! Random-forest classifier for the binary churn label
//!
//! Bagged CART trees with per-split feature subsampling. Probabilities are
//! the mean of each tree's leaf positive share; everything is seeded, so
//! the same data and params give the same forest.

mod tree;


use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use tree::{DecisionTree, TreeLimits};

/// How training rows are weighted by class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    /// Every row counts once
    Uniform,
    /// `n / (n_classes * count(class))`, so each class carries equal total weight
    #[default]
    Balanced,
}

impl fmt::Display for ClassWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Forest hyperparameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_leaf: usize,
    pub class_weight: ClassWeight,
    pub random_state: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            max_depth: Some(20),
            min_samples_leaf: 2,
            class_weight: ClassWeight::Balanced,
            random_state: 42,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::InvalidInput("n_estimators must be at least 1".to_string()));
        }
        if self.min_samples_leaf == 0 {
            return Err(Error::InvalidInput("min_samples_leaf must be at least 1".to_string()));
        }
        if self.max_depth == Some(0) {
            return Err(Error::InvalidInput("max_depth must be at least 1 when set".to_string()));
        }
        Ok(())
    }

    /// Name/value pairs as recorded by the experiment tracker
    pub fn as_params(&self) -> Vec<(String, String)> {
        vec![
            ("n_estimators".to_string(), self.n_estimators.to_string()),
            (
                "max_depth".to_string(),
                self.max_depth.map_or_else(|| "None".to_string(), |d| d.to_string()),
            ),
            ("class_weight".to_string(), self.class_weight.to_string()),
            ("min_samples_leaf".to_string(), self.min_samples_leaf.to_string()),
            ("random_state".to_string(), self.random_state.to_string()),
        ]
    }
}

/// A fitted forest over a fixed number of input features
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

/// Per-row weights for labels in {0, 1}
fn class_weights(y: &[usize], mode: ClassWeight) -> Vec<f64> {
    match mode {
        ClassWeight::Uniform => vec![1.0; y.len()],
        ClassWeight::Balanced => {
            let mut counts = [0usize; 2];
            for &label in y {
                counts[label] += 1;
            }
            let present = counts.iter().filter(|&&c| c > 0).count() as f64;
            let n = y.len() as f64;
            y.iter().map(|&label| n / (present * counts[label] as f64)).collect()
        }
    }
}

impl RandomForest {
    /// Fit on row-major `x` with labels `y` in {0, 1}
    pub fn fit(x: &[Vec<f64>], y: &[usize], params: &ForestParams) -> Result<Self> {
        params.validate()?;
        if x.is_empty() {
            return Err(Error::DataIntegrity("cannot fit a forest on zero rows".to_string()));
        }
        if x.len() != y.len() {
            return Err(Error::InvalidInput(format!("{} feature rows but {} labels", x.len(), y.len())));
        }
        let n_features = x[0].len();
        if n_features == 0 {
            return Err(Error::DataIntegrity("cannot fit a forest without features".to_string()));
        }
        for (i, row) in x.iter().enumerate() {
            if row.len() != n_features {
                return Err(Error::InvalidInput(format!(
                    "row {i} has {} values, expected {n_features}",
                    row.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::DataIntegrity(format!("row {i} contains a non-finite value")));
            }
        }
        if let Some(bad) = y.iter().find(|&&label| label > 1) {
            return Err(Error::DataIntegrity(format!("label {bad} is not binary")));
        }

        let weights = class_weights(y, params.class_weight);
        let limits = TreeLimits {
            max_depth: params.max_depth,
            min_samples_leaf: params.min_samples_leaf,
            max_features: ((n_features as f64).sqrt().floor() as usize).max(1),
        };

        let n = x.len();
        let mut seeds = StdRng::seed_from_u64(params.random_state);
        let trees = (0..params.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(seeds.random());
                let rows: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                DecisionTree::fit(x, y, &weights, rows, limits, &mut rng)
            })
            .collect();

        Ok(Self { params: params.clone(), n_features, trees })
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Input width the forest was fitted on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Probability of churn (class 1) for one row
    pub fn predict_proba(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(Error::InvalidInput(format!(
                "expected {} feature values, got {}",
                self.n_features,
                row.len()
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput("feature values must be finite".to_string()));
        }
        let total: f64 = self.trees.iter().map(|t| t.predict_positive(row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    /// Class 1 when the churn probability is above one half
    pub fn predict(&self, row: &[f64]) -> Result<usize> {
        Ok(usize::from(self.predict_proba(row)? > 0.5))
    }

    /// Check a deserialized forest before serving from it
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::Serialization("model has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if !tree.is_well_formed() {
                return Err(Error::Serialization(format!("tree {i} is malformed")));
            }
            if tree.max_feature_index().is_some_and(|f| f >= self.n_features) {
                return Err(Error::Serialization(format!(
                    "tree {i} reads a feature beyond the model's {} inputs",
                    self.n_features
                )));
            }
        }
        Ok(())
    }
}
