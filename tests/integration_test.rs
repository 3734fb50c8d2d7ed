//! End-to-end pipeline test: synthesize data, engineer features,
//! cross-validate, train the final model, predict, and price the residuals.

use chrono::NaiveDate;
use demand_forecast::cv::{cross_validate, TimeSeriesSplit};
use demand_forecast::data::{
    read_cv_results, read_predictions, read_training_data, write_cv_results, write_predictions,
    write_training_data,
};
use demand_forecast::features::engineer_features;
use demand_forecast::impact::compute_financial_impact;
use demand_forecast::models::RandomForestRegressor;
use demand_forecast::synthetic::{generate_dataset, SyntheticConfig};
use demand_forecast::{
    CostAssumptions, CvReport, FeatureSet, ModelArtifact, PipelineConfig, PredictionRecord,
};

fn small_config() -> SyntheticConfig {
    SyntheticConfig {
        countries: vec!["DE".to_string(), "US".to_string()],
        start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        days: 100,
        seed: 11,
    }
}

#[test]
fn test_generation_is_deterministic() {
    let a = generate_dataset(&small_config()).unwrap();
    let b = generate_dataset(&small_config()).unwrap();
    assert_eq!(a, b);
    // 2 countries x 100 days
    assert_eq!(a.len(), 200);
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());

    // Stage 1: synthesize the training dataset
    let records = generate_dataset(&small_config()).unwrap();
    write_training_data(config.training_dataset(), &records).unwrap();

    // Stage 2: feature engineering
    let loaded = read_training_data(config.training_dataset()).unwrap();
    assert_eq!(loaded, records);
    let features = engineer_features(&loaded).unwrap();
    // 14 warm-up days dropped per country
    assert_eq!(features.len(), 2 * (100 - 14));
    features.write_csv(config.feature_matrix()).unwrap();

    // Stage 3: time-series cross-validation
    let features = FeatureSet::read_csv(config.feature_matrix()).unwrap();
    let cv_model = RandomForestRegressor::new(20, 6, 5, 42).unwrap();
    let splitter = TimeSeriesSplit::new(4).unwrap();
    let folds = cross_validate(&features, &cv_model, &splitter).unwrap();
    assert_eq!(folds.len(), 4);
    write_cv_results(config.cv_results(), &folds).unwrap();

    // Stage 4: CV analysis
    let report = CvReport::from_records(read_cv_results(config.cv_results()).unwrap()).unwrap();
    assert!(report.wape().mean.is_finite());
    assert!(report.wape().mean >= 0.0);

    // Stage 5: final model training and persistence
    let final_model = RandomForestRegressor::new(30, 8, 5, 42).unwrap();
    let artifact = ModelArtifact::fit(&features, &final_model).unwrap();
    artifact.save(config.model_artifact()).unwrap();

    let restored = ModelArtifact::load(config.model_artifact()).unwrap();
    assert_eq!(restored, artifact);

    // Stage 6: predictions from the restored artifact match the original
    let mut ordered = features.clone();
    ordered.sort_by_date();
    let predictions = restored.predict(&ordered).unwrap();
    assert_eq!(predictions, artifact.predict(&ordered).unwrap());
    assert_eq!(predictions.len(), ordered.len());

    let prediction_records: Vec<PredictionRecord> = ordered
        .rows()
        .iter()
        .zip(&predictions)
        .map(|(row, &prediction)| PredictionRecord {
            date: row.date,
            country: row.country.clone(),
            actual_demand: row.target,
            baseline_prediction: prediction,
        })
        .collect();
    write_predictions(config.predictions(), &prediction_records).unwrap();

    // Stage 7: financial impact
    let loaded = read_predictions(config.predictions()).unwrap();
    let impact = compute_financial_impact(&loaded, &CostAssumptions::default()).unwrap();

    assert!(impact.total_forecast_cost >= 0.0);
    assert!(
        (impact.total_under_forecast_cost + impact.total_over_forecast_cost
            - impact.total_forecast_cost)
            .abs()
            < 1e-6
    );
    assert_eq!(impact.rows.len(), loaded.len());

    // An in-sample forest should beat a naive always-mean forecast
    let mean_demand = ordered.targets().iter().sum::<f64>() / ordered.len() as f64;
    let naive: Vec<PredictionRecord> = ordered
        .rows()
        .iter()
        .map(|row| PredictionRecord {
            date: row.date,
            country: row.country.clone(),
            actual_demand: row.target,
            baseline_prediction: mean_demand,
        })
        .collect();
    let naive_impact = compute_financial_impact(&naive, &CostAssumptions::default()).unwrap();
    assert!(impact.total_forecast_cost < naive_impact.total_forecast_cost);
}
