//! Train the final baseline model on full history and persist the artifact

use demand_forecast::models::RandomForestRegressor;
use demand_forecast::{init_logging, FeatureSet, ModelArtifact, PipelineConfig, Result};
use tracing::info;

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();

    let mut features = FeatureSet::read_csv(config.feature_matrix())?;
    features.sort_by_date();
    info!(rows = features.len(), "feature matrix loaded");
    if let Some((start, end)) = features.date_range() {
        info!(%start, %end, "date range");
    }

    let model = RandomForestRegressor::final_baseline()?;
    let artifact = ModelArtifact::fit(&features, &model)?;
    artifact.save(config.model_artifact())?;

    info!("final baseline model is ready for prediction and impact analysis");
    Ok(())
}
