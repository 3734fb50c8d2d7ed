//! CART regression tree with variance-reduction splits

use crate::error::{ForecastError, Result};
use crate::models::{validate_fit_inputs, Matrix, Regressor, TrainedRegressor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const MIN_SSE_IMPROVEMENT: f64 = 1e-12;

/// Regression tree configuration
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    name: String,
    max_depth: usize,
    min_samples_leaf: usize,
}

impl DecisionTreeRegressor {
    /// Create a new regression tree configuration
    pub fn new(max_depth: usize, min_samples_leaf: usize) -> Result<Self> {
        if max_depth == 0 {
            return Err(ForecastError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if min_samples_leaf == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            name: format!(
                "Decision Tree (max_depth={}, min_samples_leaf={})",
                max_depth, min_samples_leaf
            ),
            max_depth,
            min_samples_leaf,
        })
    }

    /// Maximum tree depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Minimum samples per leaf
    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }
}

/// A node in the fitted tree, stored in an index arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Trained regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedDecisionTree {
    name: String,
    n_features: usize,
    nodes: Vec<Node>,
    root: usize,
}

impl TrainedDecisionTree {
    /// Number of features the tree was fit on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of nodes in the fitted tree
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = self.root;
        loop {
            match self.nodes[node] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl TrainedRegressor for TrainedDecisionTree {
    fn predict(&self, x: &Matrix) -> Result<Vec<f64>> {
        if x.n_cols() != self.n_features {
            return Err(ForecastError::ValidationError(format!(
                "Tree was fit on {} features but input has {}",
                self.n_features,
                x.n_cols()
            )));
        }
        Ok(x.iter_rows().map(|row| self.predict_row(row)).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct TreeBuilder<'a> {
    x: &'a Matrix,
    y: &'a [f64],
    max_depth: usize,
    min_samples_leaf: usize,
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
    sse: f64,
}

impl<'a> TreeBuilder<'a> {
    fn mean(&self, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| self.y[i]).sum::<f64>() / indices.len() as f64
    }

    /// Sum of squared errors around the mean of the selected targets
    fn sse(&self, indices: &[usize]) -> f64 {
        let n = indices.len() as f64;
        let sum: f64 = indices.iter().map(|&i| self.y[i]).sum();
        let sum_sq: f64 = indices.iter().map(|&i| self.y[i] * self.y[i]).sum();
        (sum_sq - sum * sum / n).max(0.0)
    }

    fn leaf(&mut self, indices: &[usize]) -> usize {
        self.nodes.push(Node::Leaf {
            value: self.mean(indices),
        });
        self.nodes.len() - 1
    }

    fn best_split(&self, indices: &[usize]) -> Option<BestSplit> {
        let n = indices.len();
        let mut best: Option<BestSplit> = None;

        for feature in 0..self.x.n_cols() {
            let mut sorted: Vec<usize> = indices.to_vec();
            sorted.sort_by(|&a, &b| {
                self.x.row(a)[feature]
                    .partial_cmp(&self.x.row(b)[feature])
                    .unwrap_or(Ordering::Equal)
            });

            // Prefix sums over the sorted targets for O(n) split scoring
            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            let total_sum: f64 = sorted.iter().map(|&i| self.y[i]).sum();
            let total_sum_sq: f64 = sorted.iter().map(|&i| self.y[i] * self.y[i]).sum();

            for k in 1..n {
                let prev = sorted[k - 1];
                sum += self.y[prev];
                sum_sq += self.y[prev] * self.y[prev];

                if k < self.min_samples_leaf || n - k < self.min_samples_leaf {
                    continue;
                }

                let left_value = self.x.row(prev)[feature];
                let right_value = self.x.row(sorted[k])[feature];
                if left_value >= right_value {
                    continue;
                }

                let left_n = k as f64;
                let right_n = (n - k) as f64;
                let right_sum = total_sum - sum;
                let right_sum_sq = total_sum_sq - sum_sq;

                let sse_left = (sum_sq - sum * sum / left_n).max(0.0);
                let sse_right = (right_sum_sq - right_sum * right_sum / right_n).max(0.0);
                let sse = sse_left + sse_right;

                if best.as_ref().map_or(true, |b| sse < b.sse) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (left_value + right_value) / 2.0,
                        left: sorted[..k].to_vec(),
                        right: sorted[k..].to_vec(),
                        sse,
                    });
                }
            }
        }

        best
    }

    fn build(&mut self, indices: &[usize], depth: usize) -> usize {
        let parent_sse = self.sse(indices);
        if depth >= self.max_depth
            || indices.len() < 2 * self.min_samples_leaf
            || parent_sse <= MIN_SSE_IMPROVEMENT
        {
            return self.leaf(indices);
        }

        match self.best_split(indices) {
            Some(split) if split.sse + MIN_SSE_IMPROVEMENT < parent_sse => {
                let left = self.build(&split.left, depth + 1);
                let right = self.build(&split.right, depth + 1);
                self.nodes.push(Node::Split {
                    feature: split.feature,
                    threshold: split.threshold,
                    left,
                    right,
                });
                self.nodes.len() - 1
            }
            _ => self.leaf(indices),
        }
    }
}

impl Regressor for DecisionTreeRegressor {
    type Trained = TrainedDecisionTree;

    fn fit(&self, x: &Matrix, y: &[f64]) -> Result<Self::Trained> {
        validate_fit_inputs(x, y)?;

        let mut builder = TreeBuilder {
            x,
            y,
            max_depth: self.max_depth,
            min_samples_leaf: self.min_samples_leaf,
            nodes: Vec::new(),
        };
        let indices: Vec<usize> = (0..x.n_rows()).collect();
        let root = builder.build(&indices, 0);

        Ok(TrainedDecisionTree {
            name: self.name.clone(),
            n_features: x.n_cols(),
            nodes: builder.nodes,
            root,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
