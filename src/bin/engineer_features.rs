//! Transform the raw training dataset into the final ML feature matrix

use demand_forecast::data::{date_range, read_training_data};
use demand_forecast::features::engineer_features;
use demand_forecast::{init_logging, PipelineConfig, Result};
use tracing::info;

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();

    let records = read_training_data(config.training_dataset())?;
    info!(rows = records.len(), "training dataset loaded");
    if let Some((start, end)) = date_range(&records) {
        info!(%start, %end, "date range");
    }

    let features = engineer_features(&records)?;

    let path = config.feature_matrix();
    features.write_csv(&path)?;
    info!(
        rows = features.len(),
        features = features.numeric_names().len(),
        path = %path.display(),
        "feature matrix written"
    );
    Ok(())
}
