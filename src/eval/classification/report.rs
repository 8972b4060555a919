//! sklearn-style classification report
//!
//! Serializes to the same shape as `classification_report(output_dict=True)`:
//! one object per class label, then `accuracy`, `macro avg`, `weighted avg`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::confusion::ConfusionMatrix;

/// Precision, recall, F1 and support for one class (or an average row)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: f64,
}

/// Per-class metrics plus overall accuracy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Keyed by class label (`"0"`, `"1"`, ...)
    #[serde(flatten)]
    pub classes: BTreeMap<String, ClassMetrics>,
    pub accuracy: f64,
    #[serde(rename = "macro avg", default, skip_serializing_if = "Option::is_none")]
    pub macro_avg: Option<ClassMetrics>,
    #[serde(rename = "weighted avg", default, skip_serializing_if = "Option::is_none")]
    pub weighted_avg: Option<ClassMetrics>,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    /// Build from class-index predictions; zero denominators yield 0.0
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Self {
        let cm = ConfusionMatrix::from_predictions(y_pred, y_true, n_classes);
        Self::from_confusion_matrix(&cm)
    }

    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let per_class: Vec<ClassMetrics> = (0..cm.n_classes())
            .map(|class| {
                let tp = cm.true_positives(class);
                let precision = ratio(tp, tp + cm.false_positives(class));
                let recall = ratio(tp, tp + cm.false_negatives(class));
                let f1_score = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics { precision, recall, f1_score, support: cm.support(class) as f64 }
            })
            .collect();

        let total = cm.total() as f64;
        let n = per_class.len().max(1) as f64;
        let average = |weighted: bool| {
            let weight = |m: &ClassMetrics| {
                if weighted {
                    if total > 0.0 {
                        m.support / total
                    } else {
                        0.0
                    }
                } else {
                    1.0 / n
                }
            };
            ClassMetrics {
                precision: per_class.iter().map(|m| m.precision * weight(m)).sum(),
                recall: per_class.iter().map(|m| m.recall * weight(m)).sum(),
                f1_score: per_class.iter().map(|m| m.f1_score * weight(m)).sum(),
                support: total,
            }
        };

        Self {
            macro_avg: Some(average(false)),
            weighted_avg: Some(average(true)),
            accuracy: cm.accuracy(),
            classes: per_class.into_iter().enumerate().map(|(c, m)| (c.to_string(), m)).collect(),
        }
    }

    /// Metrics for one class label
    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.get(label)
    }

    /// Flat `(name, value)` pairs for experiment trackers
    pub fn flat_metrics(&self) -> Vec<(String, f64)> {
        let mut out = Vec::with_capacity(self.classes.len() * 3 + 1);
        for (label, m) in &self.classes {
            out.push((format!("precision_{label}"), m.precision));
            out.push((format!("recall_{label}"), m.recall));
            out.push((format!("f1_{label}"), m.f1_score));
        }
        out.push(("accuracy".to_string(), self.accuracy));
        out
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for (label, m) in &self.classes {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                label, m.precision, m.recall, m.f1_score, m.support
            )?;
        }
        writeln!(f)?;
        let total = self.weighted_avg.map_or(0.0, |m| m.support);
        writeln!(f, "{:>12} {:>10} {:>10} {:>10.2} {:>10}", "accuracy", "", "", self.accuracy, total)?;
        for (name, row) in [("macro avg", self.macro_avg), ("weighted avg", self.weighted_avg)] {
            if let Some(m) = row {
                writeln!(
                    f,
                    "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                    name, m.precision, m.recall, m.f1_score, m.support
                )?;
            }
        }
        Ok(())
    }
}
