use demand_forecast::OneHotEncoder;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_fit_collects_sorted_distinct_categories() {
    let encoder = OneHotEncoder::fit(&["FR", "DE", "FR", "US"]).unwrap();
    assert_eq!(encoder.categories(), &["DE", "FR", "US"]);
    assert_eq!(encoder.width(), 3);
}

#[test]
fn test_fit_on_empty_column_fails() {
    let values: Vec<&str> = vec![];
    assert!(OneHotEncoder::fit(&values).is_err());
}

#[rstest]
#[case("DE", vec![1.0, 0.0, 0.0])]
#[case("FR", vec![0.0, 1.0, 0.0])]
#[case("US", vec![0.0, 0.0, 1.0])]
// A category never seen in training encodes as all zeros
#[case("ES", vec![0.0, 0.0, 0.0])]
fn test_transform(#[case] value: &str, #[case] expected: Vec<f64>) {
    let encoder = OneHotEncoder::fit(&["FR", "DE", "US"]).unwrap();
    let encoded = encoder.transform(&[value]).unwrap();
    assert_eq!(encoded.row(0), expected.as_slice());
}

#[test]
fn test_transform_many_rows() {
    let encoder = OneHotEncoder::fit(&["DE", "FR"]).unwrap();
    let encoded = encoder.transform(&["FR", "FR", "DE"]).unwrap();
    assert_eq!(encoded.n_rows(), 3);
    assert_eq!(encoded.n_cols(), 2);
    assert_eq!(encoded.row(0), &[0.0, 1.0]);
    assert_eq!(encoded.row(2), &[1.0, 0.0]);
}
