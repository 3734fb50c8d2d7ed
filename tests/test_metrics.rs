use assert_approx_eq::assert_approx_eq;
use demand_forecast::metrics::{
    mean_absolute_error, mean_absolute_percentage_error, mean_squared_error,
    root_mean_squared_error, symmetric_mean_absolute_percentage_error, wape,
};

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let mae = mean_absolute_error(&actual, &predicted);
    assert_approx_eq!(mae, 2.4, 0.01);

    let mse = mean_squared_error(&actual, &predicted);
    assert_approx_eq!(mse, 6.0, 0.01);

    let rmse = root_mean_squared_error(&actual, &predicted);
    assert_approx_eq!(rmse, 2.449, 0.01);

    let mape = mean_absolute_percentage_error(&actual, &predicted);
    assert_approx_eq!(mape, 0.103, 0.001);

    let smape = symmetric_mean_absolute_percentage_error(&actual, &predicted);
    assert!(smape > 0.0 && smape < 0.15);
}

#[test]
fn test_wape() {
    let actual = vec![10.0, 20.0, 30.0, 40.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0];

    // Sum of absolute errors is 10, sum of actuals is 100
    assert_approx_eq!(wape(&actual, &predicted), 0.1);

    // A perfect forecast has zero WAPE
    assert_approx_eq!(wape(&actual, &actual), 0.0);

    // Zero total actual demand is undefined
    let zeros = vec![0.0, 0.0];
    assert!(wape(&zeros, &[1.0, 2.0]).is_nan());
}

#[test]
fn test_error_handling() {
    let empty: Vec<f64> = vec![];
    let actual = vec![1.0, 2.0];

    assert!(mean_absolute_error(&empty, &actual).is_nan());
    assert!(wape(&empty, &empty).is_nan());

    // Mismatched lengths
    let predicted = vec![1.0, 2.0, 3.0];
    assert!(mean_squared_error(&actual, &predicted).is_nan());
    assert!(wape(&actual, &predicted).is_nan());
    assert!(symmetric_mean_absolute_percentage_error(&actual, &predicted).is_nan());
}

#[test]
fn test_mape_skips_zero_actuals() {
    let actual = vec![0.0, 10.0];
    let predicted = vec![5.0, 11.0];

    // Only the non-zero actual contributes: |10 - 11| / 10
    assert_approx_eq!(mean_absolute_percentage_error(&actual, &predicted), 0.1);

    // All-zero actuals leave nothing to average
    assert!(mean_absolute_percentage_error(&[0.0], &[1.0]).is_nan());
}
