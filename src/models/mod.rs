//! Regression models for demand forecasting

use crate::error::{ForecastError, Result};
use std::fmt::Debug;

/// Dense row-major feature matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
    n_cols: usize,
}

impl Matrix {
    /// Build a matrix from row vectors; every row must have the same width
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(ForecastError::ValidationError(
                "All matrix rows must have the same length".to_string(),
            ));
        }
        Ok(Self { rows, n_cols })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A single row as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Select a subset of rows by index (indices may repeat)
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        let mut rows = Vec::with_capacity(indices.len());
        for &i in indices {
            let row = self.rows.get(i).ok_or_else(|| {
                ForecastError::ValidationError(format!(
                    "Row index {} out of bounds for matrix with {} rows",
                    i,
                    self.rows.len()
                ))
            })?;
            rows.push(row.clone());
        }
        Ok(Self {
            rows,
            n_cols: self.n_cols,
        })
    }

    /// Horizontally stack two matrices with the same number of rows
    pub fn hstack(&self, other: &Matrix) -> Result<Matrix> {
        if self.n_rows() != other.n_rows() {
            return Err(ForecastError::ValidationError(format!(
                "Cannot hstack matrices with {} and {} rows",
                self.n_rows(),
                other.n_rows()
            )));
        }
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| {
                let mut row = Vec::with_capacity(a.len() + b.len());
                row.extend_from_slice(a);
                row.extend_from_slice(b);
                row
            })
            .collect();
        Ok(Matrix {
            rows,
            n_cols: self.n_cols + other.n_cols,
        })
    }
}

/// Trained regression model
pub trait TrainedRegressor: Debug {
    /// Predict the target for every row of the feature matrix
    fn predict(&self, x: &Matrix) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Regression model configuration that can be fit to a feature matrix
pub trait Regressor: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedRegressor;

    /// Fit the model to a feature matrix and target vector
    fn fit(&self, x: &Matrix, y: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Shared fit-input validation for tree-based models
pub(crate) fn validate_fit_inputs(x: &Matrix, y: &[f64]) -> Result<()> {
    if x.is_empty() || y.is_empty() {
        return Err(ForecastError::ValidationError(
            "Cannot fit a model on an empty dataset".to_string(),
        ));
    }
    if x.n_rows() != y.len() {
        return Err(ForecastError::ValidationError(format!(
            "Feature matrix has {} rows but target has {} values",
            x.n_rows(),
            y.len()
        )));
    }
    Ok(())
}

pub mod decision_tree;
pub mod random_forest;

pub use decision_tree::{DecisionTreeRegressor, TrainedDecisionTree};
pub use random_forest::{RandomForestRegressor, TrainedRandomForest};
