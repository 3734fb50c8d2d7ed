//! Time-series cross-validation
//!
//! Expanding-window splits: fold k trains on everything strictly before its
//! test block, so no future row ever leaks into training. The categorical
//! encoder is re-fit on each fold's training rows only.

use crate::data::CvFoldRecord;
use crate::encoding::OneHotEncoder;
use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::metrics::{mean_absolute_error, wape};
use crate::models::{Matrix, Regressor, TrainedRegressor};
use tracing::info;

/// Default number of folds for baseline cross-validation
pub const DEFAULT_N_SPLITS: usize = 5;

/// Expanding-window splitter over time-ordered samples.
///
/// With `n` samples and `s` splits, each test block holds `n / (s + 1)`
/// samples; any remainder stays in the earliest training window. Fold `i`
/// (0-based) tests `[n - (s - i) * test_size, n - (s - i - 1) * test_size)`.
#[derive(Debug, Clone)]
pub struct TimeSeriesSplit {
    n_splits: usize,
}

impl TimeSeriesSplit {
    /// Create a splitter with the given number of folds
    pub fn new(n_splits: usize) -> Result<Self> {
        if n_splits < 2 {
            return Err(ForecastError::InvalidParameter(
                "n_splits must be at least 2".to_string(),
            ));
        }
        Ok(Self { n_splits })
    }

    /// Number of folds
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Produce (train, test) index vectors for each fold
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        let test_size = n_samples / (self.n_splits + 1);
        if test_size == 0 {
            return Err(ForecastError::ValidationError(format!(
                "Cannot split {} samples into {} folds",
                n_samples, self.n_splits
            )));
        }

        let mut folds = Vec::with_capacity(self.n_splits);
        for i in 0..self.n_splits {
            let test_start = n_samples - (self.n_splits - i) * test_size;
            let train: Vec<usize> = (0..test_start).collect();
            let test: Vec<usize> = (test_start..test_start + test_size).collect();
            folds.push((train, test));
        }
        Ok(folds)
    }
}

fn subset<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}

/// Build the model input by stacking numeric features with the encoded
/// categorical block
pub fn design_matrix(
    numeric: &Matrix,
    countries: &[&str],
    encoder: &OneHotEncoder,
) -> Result<Matrix> {
    let encoded = encoder.transform(countries)?;
    numeric.hstack(&encoded)
}

/// Run expanding-window cross-validation of a regressor over the feature set.
///
/// Rows are stably re-ordered by date first, matching the global date sort
/// the per-fold windows assume. Returns one record per fold with MAE and WAPE.
pub fn cross_validate<R: Regressor>(
    features: &FeatureSet,
    model: &R,
    splitter: &TimeSeriesSplit,
) -> Result<Vec<CvFoldRecord>> {
    let mut ordered = features.clone();
    ordered.sort_by_date();

    let numeric = ordered.numeric_matrix()?;
    let targets = ordered.targets();
    let countries = ordered.countries();
    let dates = ordered.dates();

    info!(
        rows = ordered.len(),
        n_splits = splitter.n_splits(),
        model = model.name(),
        "running time-series cross-validation"
    );

    let mut results = Vec::with_capacity(splitter.n_splits());
    for (fold_idx, (train_idx, test_idx)) in splitter.split(ordered.len())?.into_iter().enumerate()
    {
        let fold = fold_idx + 1;

        let train_countries = subset(&countries, &train_idx);
        let test_countries = subset(&countries, &test_idx);

        // Fit the encoder on the training rows only
        let encoder = OneHotEncoder::fit(&train_countries)?;

        let x_train = design_matrix(&numeric.select_rows(&train_idx)?, &train_countries, &encoder)?;
        let x_test = design_matrix(&numeric.select_rows(&test_idx)?, &test_countries, &encoder)?;
        let y_train = subset(&targets, &train_idx);
        let y_test = subset(&targets, &test_idx);

        info!(
            fold,
            train_rows = train_idx.len(),
            test_rows = test_idx.len(),
            train_start = %dates[train_idx[0]],
            train_end = %dates[*train_idx.last().unwrap_or(&0)],
            test_start = %dates[test_idx[0]],
            test_end = %dates[*test_idx.last().unwrap_or(&0)],
            "fold window"
        );

        let trained = model.fit(&x_train, &y_train)?;
        let predictions = trained.predict(&x_test)?;

        let fold_mae = mean_absolute_error(&y_test, &predictions);
        let fold_wape = wape(&y_test, &predictions);

        info!(fold, mae = fold_mae, wape = fold_wape, "fold scored");

        results.push(CvFoldRecord {
            fold,
            mae: fold_mae,
            wape: fold_wape,
        });
    }

    Ok(results)
}
