//! CART regression tree.
//!
//! Each internal node splits on one feature at the midpoint between two
//! adjacent distinct sorted values, picking the split that minimises the
//! summed squared error of the two children. Leaves predict the mean target
//! of their training rows. Rows with `x <= threshold` go left.

use super::Regressor;
use crate::data::Features;
use crate::error::{check_lengths, Error, Result};
use log::debug;

pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, x: &Features) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.leaves() + right.leaves(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f64,
    sse: f64,
}

#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    /// `None` grows until leaves are pure or unsplittable.
    pub max_depth: Option<usize>,
    /// Nodes with fewer rows become leaves.
    pub min_samples_split: usize,
    root: Option<Node>,
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            root: None,
        }
    }
}

impl DecisionTreeRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    /// Depth of the fitted tree; a lone leaf has depth 0.
    pub fn depth(&self) -> Option<usize> {
        self.root.as_ref().map(Node::depth)
    }

    pub fn leaf_count(&self) -> Option<usize> {
        self.root.as_ref().map(Node::leaves)
    }

    fn build(&self, features: &[Features], targets: &[f64], rows: &mut [usize], depth: usize) -> Node {
        let n = rows.len();
        let first = targets[rows[0]];
        if rows.iter().all(|&i| targets[i] == first) {
            return Node::Leaf { value: first };
        }

        let mean = rows.iter().map(|&i| targets[i]).sum::<f64>() / n as f64;
        let leaf = Node::Leaf { value: mean };

        let depth_reached = self.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || n < self.min_samples_split {
            return leaf;
        }

        let Some(best) = best_split(features, targets, rows) else {
            return leaf;
        };

        let (left_rows, right_rows) = partition(rows, |i| features[i][best.feature] <= best.threshold);
        if left_rows.is_empty() || right_rows.is_empty() {
            return leaf;
        }

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(self.build(features, targets, left_rows, depth + 1)),
            right: Box::new(self.build(features, targets, right_rows, depth + 1)),
        }
    }
}

/// Reorders `rows` so matching rows come first and returns both halves.
fn partition<F: Fn(usize) -> bool>(rows: &mut [usize], goes_left: F) -> (&mut [usize], &mut [usize]) {
    let mut split = 0;
    for k in 0..rows.len() {
        if goes_left(rows[k]) {
            rows.swap(split, k);
            split += 1;
        }
    }
    rows.split_at_mut(split)
}

fn best_split(features: &[Features], targets: &[f64], rows: &[usize]) -> Option<BestSplit> {
    let n = rows.len();
    let mut order = rows.to_vec();
    let mut best: Option<BestSplit> = None;

    let total_sum: f64 = rows.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = rows.iter().map(|&i| targets[i] * targets[i]).sum();

    for feature in 0..4 {
        order.sort_by(|&a, &b| features[a][feature].total_cmp(&features[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let y = targets[order[k - 1]];
            left_sum += y;
            left_sq += y * y;

            let lo = features[order[k - 1]][feature];
            let hi = features[order[k]][feature];
            if !(lo < hi) {
                continue;
            }

            let n_left = k as f64;
            let n_right = (n - k) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / n_left) + (right_sq - right_sum * right_sum / n_right);

            if best.map_or(true, |b| sse < b.sse) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    sse,
                });
            }
        }
    }

    best
}

impl Regressor for DecisionTreeRegressor {
    fn name(&self) -> &str {
        "decision-tree"
    }

    fn fit(&mut self, features: &[Features], targets: &[f64]) -> Result<()> {
        check_lengths(features.len(), targets.len())?;
        if features.is_empty() {
            return Err(Error::Empty);
        }
        if self.min_samples_split < 2 {
            return Err(Error::InvalidParameter {
                name: "min_samples_split",
                message: format!("must be at least 2, got {}", self.min_samples_split),
            });
        }

        let mut rows: Vec<usize> = (0..features.len()).collect();
        let root = self.build(features, targets, &mut rows, 0);
        debug!(
            "Fitted tree on {} rows: depth {}, {} leaves",
            features.len(),
            root.depth(),
            root.leaves()
        );
        self.root = Some(root);
        Ok(())
    }

    fn predict(&self, features: &[Features]) -> Result<Vec<f64>> {
        let root = self.root.as_ref().ok_or(Error::NotFitted)?;
        Ok(features.iter().map(|x| root.predict(x)).collect())
    }
}
