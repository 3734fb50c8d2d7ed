//! Bootstrap-bagged random forest regressor

use crate::error::{ForecastError, Result};
use crate::models::decision_tree::{DecisionTreeRegressor, TrainedDecisionTree};
use crate::models::{validate_fit_inputs, Matrix, Regressor, TrainedRegressor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default random seed shared across the pipeline
pub const DEFAULT_SEED: u64 = 42;

/// Random forest configuration
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    name: String,
    n_estimators: usize,
    max_depth: usize,
    min_samples_leaf: usize,
    seed: u64,
}

impl RandomForestRegressor {
    /// Create a new random forest configuration
    pub fn new(
        n_estimators: usize,
        max_depth: usize,
        min_samples_leaf: usize,
        seed: u64,
    ) -> Result<Self> {
        if n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        // Validate tree hyperparameters eagerly
        DecisionTreeRegressor::new(max_depth, min_samples_leaf)?;

        Ok(Self {
            name: format!(
                "Random Forest (n_estimators={}, max_depth={}, min_samples_leaf={})",
                n_estimators, max_depth, min_samples_leaf
            ),
            n_estimators,
            max_depth,
            min_samples_leaf,
            seed,
        })
    }

    /// Configuration used for baseline cross-validation
    pub fn baseline_cv() -> Result<Self> {
        Self::new(200, 10, 10, DEFAULT_SEED)
    }

    /// Configuration used for the final full-history baseline model
    pub fn final_baseline() -> Result<Self> {
        Self::new(300, 12, 10, DEFAULT_SEED)
    }

    /// Number of trees in the forest
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Random seed
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Trained random forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedRandomForest {
    name: String,
    trees: Vec<TrainedDecisionTree>,
}

impl TrainedRandomForest {
    /// Number of trees in the fitted forest
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl TrainedRegressor for TrainedRandomForest {
    fn predict(&self, x: &Matrix) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(ForecastError::ModelError(
                "Forest has no fitted trees".to_string(),
            ));
        }

        let mut totals = vec![0.0; x.n_rows()];
        for tree in &self.trees {
            let predictions = tree.predict(x)?;
            for (total, p) in totals.iter_mut().zip(predictions) {
                *total += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(totals.into_iter().map(|t| t / n_trees).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Regressor for RandomForestRegressor {
    type Trained = TrainedRandomForest;

    fn fit(&self, x: &Matrix, y: &[f64]) -> Result<Self::Trained> {
        validate_fit_inputs(x, y)?;

        let tree_config = DecisionTreeRegressor::new(self.max_depth, self.min_samples_leaf)?;
        let n = x.n_rows();
        let mut trees = Vec::with_capacity(self.n_estimators);

        for t in 0..self.n_estimators {
            // Per-tree RNG derived from the base seed keeps the forest
            // deterministic regardless of fit order
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(t as u64));
            let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            let x_boot = x.select_rows(&indices)?;
            let y_boot: Vec<f64> = indices.iter().map(|&i| y[i]).collect();

            trees.push(tree_config.fit(&x_boot, &y_boot)?);
        }

        Ok(TrainedRandomForest {
            name: self.name.clone(),
            trees,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
