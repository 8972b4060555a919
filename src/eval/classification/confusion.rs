//! Confusion matrix for class-index labels

use std::fmt;

/// `matrix[true][predicted]` sample counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Count predictions over `n_classes` labels (`0..n_classes`).
    ///
    /// Labels outside the range are ignored; extra entries in the longer
    /// slice are ignored.
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Self {
        let mut matrix = vec![vec![0; n_classes]; n_classes];
        for (&pred, &truth) in y_pred.iter().zip(y_true) {
            if pred < n_classes && truth < n_classes {
                matrix[truth][pred] += 1;
            }
        }
        Self { matrix }
    }

    pub fn n_classes(&self) -> usize {
        self.matrix.len()
    }

    pub fn get(&self, true_label: usize, predicted_label: usize) -> usize {
        self.matrix[true_label][predicted_label]
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Predicted as `class` but labelled otherwise
    pub fn false_positives(&self, class: usize) -> usize {
        self.matrix.iter().enumerate().filter(|(t, _)| *t != class).map(|(_, row)| row[class]).sum()
    }

    /// Labelled `class` but predicted otherwise
    pub fn false_negatives(&self, class: usize) -> usize {
        self.support(class) - self.true_positives(class)
    }

    /// True instances of `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Fraction on the diagonal; 0.0 for an empty matrix
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes()).map(|c| self.matrix[c][c]).sum();
        correct as f64 / total as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for j in 0..self.n_classes() {
            write!(f, "{:>8}", format!("pred {j}"))?;
        }
        writeln!(f)?;
        for (i, row) in self.matrix.iter().enumerate() {
            write!(f, "{:>8}", format!("true {i}"))?;
            for count in row {
                write!(f, "{count:>8}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
