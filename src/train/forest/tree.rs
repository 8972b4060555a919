//! Weighted CART decision tree (Gini impurity, binary labels)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Growth limits shared by every tree in a forest
#[derive(Clone, Copy, Debug)]
pub(crate) struct TreeLimits {
    pub max_depth: Option<usize>,
    pub min_samples_leaf: usize,
    pub max_features: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    /// Weighted share of the positive class among training rows in the leaf
    Leaf { positive: f64 },
    /// `x[feature] <= threshold` goes left
    Split { feature: usize, threshold: f64, left: usize, right: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
}

/// Weighted class totals `[negative, positive]`
#[derive(Clone, Copy, Default)]
struct Totals([f64; 2]);

impl Totals {
    fn add(&mut self, label: usize, weight: f64) {
        self.0[label] += weight;
    }

    fn sub(&mut self, label: usize, weight: f64) {
        self.0[label] -= weight;
    }

    fn sum(&self) -> f64 {
        self.0[0] + self.0[1]
    }

    fn gini(&self) -> f64 {
        let total = self.sum();
        if total <= 0.0 {
            return 0.0;
        }
        let p = self.0[1] / total;
        2.0 * p * (1.0 - p)
    }

    fn positive_share(&self) -> f64 {
        let total = self.sum();
        if total <= 0.0 {
            0.0
        } else {
            self.0[1] / total
        }
    }
}

struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

struct Builder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    weights: &'a [f64],
    limits: TreeLimits,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
}

impl Builder<'_> {
    fn totals(&self, rows: &[usize]) -> Totals {
        let mut totals = Totals::default();
        for &r in rows {
            totals.add(self.y[r], self.weights[r]);
        }
        totals
    }

    fn grow(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let totals = self.totals(&rows);
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { positive: totals.positive_share() });

        let depth_exhausted = self.limits.max_depth.is_some_and(|max| depth >= max);
        let too_small = rows.len() < 2 * self.limits.min_samples_leaf;
        if depth_exhausted || too_small || totals.gini() <= 0.0 {
            return id;
        }

        let Some(best) = self.best_split(&rows, &totals) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| self.x[r][best.feature] <= best.threshold);
        let left = self.grow(left_rows, depth + 1);
        let right = self.grow(right_rows, depth + 1);
        self.nodes[id] = Node::Split { feature: best.feature, threshold: best.threshold, left, right };
        id
    }

    fn best_split(&mut self, rows: &[usize], totals: &Totals) -> Option<Candidate> {
        let mut features: Vec<usize> = (0..self.x[rows[0]].len()).collect();
        features.shuffle(&mut *self.rng);
        let parent_weight = totals.sum();
        let min_leaf = self.limits.min_samples_leaf;

        let mut best: Option<Candidate> = None;
        let mut sorted = rows.to_vec();
        // Past `max_features`, keep drawing features only while no valid split exists
        for (visited, feature) in features.into_iter().enumerate() {
            if visited >= self.limits.max_features && best.is_some() {
                break;
            }
            sorted.sort_by(|&a, &b| self.x[a][feature].total_cmp(&self.x[b][feature]));

            let mut left = Totals::default();
            let mut right = *totals;
            for i in 0..sorted.len() - 1 {
                let r = sorted[i];
                left.add(self.y[r], self.weights[r]);
                right.sub(self.y[r], self.weights[r]);

                let here = self.x[r][feature];
                let next = self.x[sorted[i + 1]][feature];
                let n_left = i + 1;
                if here >= next || n_left < min_leaf || sorted.len() - n_left < min_leaf {
                    continue;
                }

                let impurity = (left.sum() * left.gini() + right.sum() * right.gini()) / parent_weight;
                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    let mut threshold = here + (next - here) / 2.0;
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(Candidate { feature, threshold, impurity });
                }
            }
        }

        best.filter(|b| b.impurity < totals.gini())
    }
}

impl DecisionTree {
    /// Grow a tree over `rows` (bootstrap rows may repeat)
    pub(crate) fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        weights: &[f64],
        rows: Vec<usize>,
        limits: TreeLimits,
        rng: &mut StdRng,
    ) -> Self {
        let mut builder = Builder { x, y, weights, limits, rng, nodes: Vec::new() };
        builder.grow(rows, 0);
        Self { nodes: builder.nodes }
    }

    /// Positive-class share of the leaf `row` lands in
    pub(crate) fn predict_positive(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { positive } => return *positive,
                Node::Split { feature, threshold, left, right } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Largest feature index any split reads, if the tree splits at all
    pub(crate) fn max_feature_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Split { feature, .. } => Some(*feature),
                Node::Leaf { .. } => None,
            })
            .max()
    }

    /// Every child index points at an existing node stored after its parent,
    /// so any walk from the root reaches a leaf
    pub(crate) fn is_well_formed(&self) -> bool {
        let n = self.nodes.len();
        n > 0
            && self.nodes.iter().enumerate().all(|(id, node)| match node {
                Node::Split { left, right, .. } => (id + 1..n).contains(left) && (id + 1..n).contains(right),
                Node::Leaf { positive } => (0.0..=1.0).contains(positive),
            })
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}
