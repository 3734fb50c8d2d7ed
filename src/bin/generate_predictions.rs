//! Generate baseline demand predictions over full history

use demand_forecast::data::write_predictions;
use demand_forecast::{
    init_logging, FeatureSet, ModelArtifact, PipelineConfig, PredictionRecord, Result,
};
use tracing::info;

fn main() -> Result<()> {
    init_logging();
    let config = PipelineConfig::from_args();

    let mut features = FeatureSet::read_csv(config.feature_matrix())?;
    features.sort_by_date();
    info!(rows = features.len(), "feature matrix loaded");

    let artifact = ModelArtifact::load(config.model_artifact())?;
    info!(
        numeric_features = artifact.numeric_features.len(),
        categorical_features = ?artifact.categorical_features,
        "model artifact loaded"
    );

    let predictions = artifact.predict(&features)?;
    let records: Vec<PredictionRecord> = features
        .rows()
        .iter()
        .zip(predictions)
        .map(|(row, prediction)| PredictionRecord {
            date: row.date,
            country: row.country.clone(),
            actual_demand: row.target,
            baseline_prediction: prediction,
        })
        .collect();

    let path = config.predictions();
    write_predictions(&path, &records)?;
    info!(rows = records.len(), path = %path.display(), "predictions written");
    Ok(())
}
