//! Cross-validate the baseline model with time-aware splits

use demand_forecast::cv::{cross_validate, TimeSeriesSplit, DEFAULT_N_SPLITS};
use demand_forecast::data::write_cv_results;
use demand_forecast::models::RandomForestRegressor;
use demand_forecast::{init_logging, FeatureSet, PipelineConfig, Result};
use tracing::info;

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();

    let features = FeatureSet::read_csv(config.feature_matrix())?;
    info!(
        rows = features.len(),
        features = features.numeric_names().len(),
        "feature matrix loaded"
    );
    if let Some((start, end)) = features.date_range() {
        info!(%start, %end, "date range");
    }

    let model = RandomForestRegressor::baseline_cv()?;
    let splitter = TimeSeriesSplit::new(DEFAULT_N_SPLITS)?;
    let folds = cross_validate(&features, &model, &splitter)?;

    let mean_wape = folds.iter().map(|f| f.wape).sum::<f64>() / folds.len() as f64;
    info!(folds = folds.len(), mean_wape, "cross-validation finished");

    let path = config.cv_results();
    write_cv_results(&path, &folds)?;
    info!(path = %path.display(), "cross-validation results written");
    Ok(())
}
