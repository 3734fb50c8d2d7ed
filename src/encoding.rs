//! One-hot encoding of categorical columns
//!
//! The encoder is always fit on the training split only; unknown categories
//! seen at transform time map to an all-zero row, so a country that never
//! appears in training cannot leak into the model through the encoding.

use crate::error::{ForecastError, Result};
use crate::models::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder over a single categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Fit the encoder on training values, collecting sorted distinct categories
    pub fn fit<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::ValidationError(
                "Cannot fit a one-hot encoder on an empty column".to_string(),
            ));
        }
        let categories: BTreeSet<String> =
            values.iter().map(|v| v.as_ref().to_string()).collect();
        Ok(Self {
            categories: categories.into_iter().collect(),
        })
    }

    /// The fitted categories, in encoding order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Width of the encoded block
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Encode values into a dense 0/1 matrix; unknown categories become all zeros
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> Result<Matrix> {
        let rows = values
            .iter()
            .map(|v| {
                let mut row = vec![0.0; self.categories.len()];
                if let Ok(pos) = self
                    .categories
                    .binary_search_by(|c| c.as_str().cmp(v.as_ref()))
                {
                    row[pos] = 1.0;
                }
                row
            })
            .collect();
        Matrix::from_rows(rows)
    }
}
