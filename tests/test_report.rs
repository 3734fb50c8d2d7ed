use assert_approx_eq::assert_approx_eq;
use demand_forecast::report::AccuracyAssessment;
use demand_forecast::{CvFoldRecord, CvReport};

fn folds(wapes: &[f64]) -> Vec<CvFoldRecord> {
    wapes
        .iter()
        .enumerate()
        .map(|(i, &wape)| CvFoldRecord {
            fold: i + 1,
            mae: 100.0 + i as f64,
            wape,
        })
        .collect()
}

#[test]
fn test_validation() {
    assert!(CvReport::from_records(vec![]).is_err());

    let mut bad = folds(&[0.02, 0.03]);
    bad[1].wape = f64::NAN;
    assert!(CvReport::from_records(bad).is_err());
}

#[test]
fn test_aggregates() {
    let report = CvReport::from_records(folds(&[0.02, 0.04, 0.06])).unwrap();

    let wape = report.wape();
    assert_approx_eq!(wape.mean, 0.04, 1e-9);
    assert_approx_eq!(wape.min, 0.02, 1e-9);
    assert_approx_eq!(wape.max, 0.06, 1e-9);
    // Spread over {0.02, 0.04, 0.06} is on the order of 0.02
    assert!(wape.std_dev > 0.015 && wape.std_dev < 0.025);

    let mae = report.mae();
    assert_approx_eq!(mae.mean, 101.0, 1e-9);
}

#[test]
fn test_assessment_thresholds() {
    let excellent = CvReport::from_records(folds(&[0.005, 0.006])).unwrap();
    assert_eq!(excellent.assessment(), AccuracyAssessment::Excellent);

    let acceptable = CvReport::from_records(folds(&[0.02, 0.025])).unwrap();
    assert_eq!(acceptable.assessment(), AccuracyAssessment::Acceptable);

    let poor = CvReport::from_records(folds(&[0.05, 0.09])).unwrap();
    assert_eq!(poor.assessment(), AccuracyAssessment::NeedsImprovement);
}

#[test]
fn test_stability_check() {
    // Spread of 0.4 percentage points across folds
    let stable = CvReport::from_records(folds(&[0.020, 0.022, 0.024])).unwrap();
    assert!(stable.is_stable());

    // Spread of 4 percentage points
    let unstable = CvReport::from_records(folds(&[0.02, 0.06])).unwrap();
    assert!(!unstable.is_stable());
}

#[test]
fn test_display_lists_every_fold() {
    let report = CvReport::from_records(folds(&[0.02, 0.04])).unwrap();
    let text = report.to_string();

    assert!(text.contains("Fold 1"));
    assert!(text.contains("Fold 2"));
    assert!(text.contains("WAPE"));
    assert!(text.contains("Verdict"));
}

#[test]
fn test_load_missing_file_points_at_training_stage() {
    let dir = tempfile::tempdir().unwrap();
    let err = CvReport::load(dir.path().join("baseline_cv_results.csv")).unwrap_err();
    assert!(err.to_string().contains("train_baseline"));
}
