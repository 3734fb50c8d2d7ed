use chrono::NaiveDate;
use demand_forecast::data::{
    date_range, read_predictions, read_training_data, write_predictions, write_training_data,
};
use demand_forecast::{DemandRecord, ForecastError, PredictionRecord};
use pretty_assertions::assert_eq;
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_record(day: u32, country: &str, with_lags: bool) -> DemandRecord {
    DemandRecord {
        date: date(2024, 1, day),
        country: country.to_string(),
        economic_index: 101.5,
        inflation_rate: 2.4,
        unemployment_rate: 5.1,
        baseline_demand: 1200.0,
        total_spend: 5400.0,
        total_channel_response: 420.0,
        total_product_demand: 1510.0,
        spend_lag_7: with_lags.then_some(5100.0),
        spend_lag_14: with_lags.then_some(4900.0),
        demand_rolling_7: with_lags.then_some(1480.0),
        demand_rolling_14: with_lags.then_some(1460.0),
    }
}

#[test]
fn test_training_data_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model_training_dataset.csv");

    let records = vec![
        sample_record(1, "DE", false),
        sample_record(2, "DE", true),
        sample_record(1, "FR", true),
    ];
    write_training_data(&path, &records).unwrap();

    let loaded = read_training_data(&path).unwrap();
    assert_eq!(loaded, records);

    // Warm-up row keeps its empty lag fields through the round trip
    assert_eq!(loaded[0].spend_lag_7, None);
    assert_eq!(loaded[1].spend_lag_7, Some(5100.0));
}

#[test]
fn test_missing_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "DATE,COUNTRY\n2024-01-01,DE\n").unwrap();

    let err = read_training_data(&path).unwrap_err();
    match err {
        ForecastError::DataError(msg) => {
            assert!(msg.contains("TOTAL_SPEND"), "unexpected message: {}", msg);
            assert!(msg.contains("SPEND_LAG_7"), "unexpected message: {}", msg);
        }
        other => panic!("expected DataError, got {:?}", other),
    }
}

#[test]
fn test_missing_file_points_at_upstream_stage() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_training_data(dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("generate_dataset"));

    let err = read_predictions(dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("generate_predictions"));
}

#[test]
fn test_predictions_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline_predictions.csv");

    let records = vec![
        PredictionRecord {
            date: date(2024, 3, 1),
            country: "US".to_string(),
            actual_demand: 900.0,
            baseline_prediction: 880.5,
        },
        PredictionRecord {
            date: date(2024, 3, 2),
            country: "US".to_string(),
            actual_demand: 910.0,
            baseline_prediction: 915.25,
        },
    ];
    write_predictions(&path, &records).unwrap();
    assert_eq!(read_predictions(&path).unwrap(), records);
}

#[test]
fn test_date_range() {
    let records = vec![
        sample_record(5, "DE", true),
        sample_record(2, "DE", true),
        sample_record(9, "FR", true),
    ];
    assert_eq!(
        date_range(&records),
        Some((date(2024, 1, 2), date(2024, 1, 9)))
    );
    assert_eq!(date_range(&[]), None);
}
