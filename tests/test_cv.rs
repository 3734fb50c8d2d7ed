use chrono::NaiveDate;
use demand_forecast::cv::{cross_validate, TimeSeriesSplit};
use demand_forecast::features::engineer_features;
use demand_forecast::models::RandomForestRegressor;
use demand_forecast::synthetic::{generate_dataset, SyntheticConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_split_validation() {
    assert!(TimeSeriesSplit::new(1).is_err());
    // 5 samples cannot feed 5 expanding folds
    assert!(TimeSeriesSplit::new(5).unwrap().split(5).is_err());
}

#[test]
fn test_expanding_window_with_unit_test_size() {
    let folds = TimeSeriesSplit::new(5).unwrap().split(10).unwrap();
    assert_eq!(folds.len(), 5);

    let train_sizes: Vec<usize> = folds.iter().map(|(train, _)| train.len()).collect();
    assert_eq!(train_sizes, vec![5, 6, 7, 8, 9]);

    let tests: Vec<Vec<usize>> = folds.iter().map(|(_, test)| test.clone()).collect();
    assert_eq!(tests, vec![vec![5], vec![6], vec![7], vec![8], vec![9]]);
}

#[test]
fn test_remainder_stays_in_first_training_window() {
    // 12 samples, 5 folds: test blocks of 2, first train keeps the remainder
    let folds = TimeSeriesSplit::new(5).unwrap().split(12).unwrap();

    assert_eq!(folds[0].0, vec![0, 1]);
    assert_eq!(folds[0].1, vec![2, 3]);
    assert_eq!(folds[4].0, (0..10).collect::<Vec<usize>>());
    assert_eq!(folds[4].1, vec![10, 11]);
}

#[rstest]
#[case(50, 3)]
#[case(100, 5)]
#[case(37, 4)]
fn test_train_always_precedes_test(#[case] n: usize, #[case] splits: usize) {
    let folds = TimeSeriesSplit::new(splits).unwrap().split(n).unwrap();
    assert_eq!(folds.len(), splits);

    for (train, test) in &folds {
        assert!(!train.is_empty());
        assert!(!test.is_empty());
        // Expanding window: training ends exactly where testing begins
        assert_eq!(train.last().unwrap() + 1, test[0]);
        assert!(test.last().unwrap() < &n);
    }

    // Consecutive test blocks tile the tail of the sample range
    for pair in folds.windows(2) {
        assert_eq!(pair[0].1.last().unwrap() + 1, pair[1].1[0]);
    }
}

#[test]
fn test_cross_validate_on_synthetic_data() {
    let config = SyntheticConfig {
        countries: vec!["DE".to_string(), "FR".to_string()],
        start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        days: 60,
        seed: 7,
    };
    let records = generate_dataset(&config).unwrap();
    let features = engineer_features(&records).unwrap();

    // Small forest keeps the test fast
    let model = RandomForestRegressor::new(10, 5, 2, 42).unwrap();
    let splitter = TimeSeriesSplit::new(3).unwrap();
    let folds = cross_validate(&features, &model, &splitter).unwrap();

    assert_eq!(folds.len(), 3);
    for (i, fold) in folds.iter().enumerate() {
        assert_eq!(fold.fold, i + 1);
        assert!(fold.mae.is_finite() && fold.mae >= 0.0);
        assert!(fold.wape.is_finite() && fold.wape >= 0.0);
    }
}
