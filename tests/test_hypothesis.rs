//! Unit tests for the two-sample hypothesis tests

use fraudlens::analysis::{
    split_by_target, two_proportion_z_test, welch_t_test, AnalysisError,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_welch_identical_groups() {
    let group = Series::new("x".into(), [1.0f64, 2.0, 3.0, 4.0, 5.0]);
    let outcome = welch_t_test(&group, &group).unwrap();

    assert!(outcome.statistic.abs() < 1e-12, "t was {}", outcome.statistic);
    assert!((outcome.p_value - 1.0).abs() < 1e-9, "p was {}", outcome.p_value);
}

#[test]
fn test_welch_detects_clear_mean_difference() {
    let df = common::create_transactions_dataframe();
    let (normal, fraud) = split_by_target(&df, "Amount", "Class").unwrap().unwrap();

    let outcome = welch_t_test(&normal, &fraud).unwrap();
    assert!(
        outcome.statistic > 0.0,
        "normal amounts are higher, t should be positive"
    );
    assert!(outcome.p_value < 1e-6, "p was {}", outcome.p_value);
}

#[test]
fn test_welch_undefined_below_two_values() {
    let single = Series::new("x".into(), [1.0f64]);
    let group = Series::new("x".into(), [1.0f64, 2.0, 3.0]);

    assert!(welch_t_test(&single, &group).is_none());
    assert!(welch_t_test(&group, &single).is_none());
}

#[test]
fn test_welch_undefined_for_zero_pooled_variance() {
    let a = Series::new("x".into(), [5.0f64; 4]);
    let b = Series::new("x".into(), [9.0f64; 4]);

    assert!(welch_t_test(&a, &b).is_none());
}

#[test]
fn test_welch_drops_missing_values() {
    let a = Series::new("x".into(), [Some(1.0f64), None, Some(2.0), Some(3.0)]);
    let b = Series::new("x".into(), [Some(1.5f64), Some(2.5), None, Some(3.5)]);

    let outcome = welch_t_test(&a, &b).unwrap();
    assert!(outcome.p_value > 0.05, "similar groups should not differ");
}

#[test]
fn test_z_test_equal_proportions() {
    let outcome = two_proportion_z_test(5, 10, 5, 10).unwrap();
    assert!(outcome.statistic.abs() < 1e-12);
    assert!((outcome.p_value - 1.0).abs() < 1e-9);
}

#[test]
fn test_z_test_detects_proportion_shift() {
    let outcome = two_proportion_z_test(90, 100, 10, 100).unwrap();
    assert!(outcome.statistic > 0.0);
    assert!(outcome.p_value < 1e-9);
}

#[test]
fn test_z_test_undefined_at_shared_extreme() {
    // Both proportions at 0: the pooled standard error vanishes
    assert!(two_proportion_z_test(0, 10, 0, 10).is_none());
    // Same at 1
    assert!(two_proportion_z_test(10, 10, 10, 10).is_none());
}

#[test]
fn test_z_test_undefined_for_empty_sample() {
    assert!(two_proportion_z_test(0, 0, 5, 10).is_none());
    assert!(two_proportion_z_test(5, 10, 0, 0).is_none());
}

#[test]
fn test_split_by_target_ascending_group_order() {
    let df = common::create_transactions_dataframe();
    let (normal, fraud) = split_by_target(&df, "Amount", "Class").unwrap().unwrap();

    assert_eq!(normal.len(), 20);
    assert_eq!(fraud.len(), 20);

    // Class 0 comes first and holds the large amounts
    let normal_mean = normal.mean().unwrap();
    let fraud_mean = fraud.mean().unwrap();
    assert!(normal_mean > 90.0, "normal mean was {}", normal_mean);
    assert!(fraud_mean < 10.0, "fraud mean was {}", fraud_mean);
}

#[test]
fn test_split_by_target_non_binary_is_none() {
    let df = df! {
        "value" => [1.0f64, 2.0, 3.0],
        "target" => [0i32, 1, 2],
    }
    .unwrap();

    assert!(split_by_target(&df, "value", "target").unwrap().is_none());
}

#[test]
fn test_split_by_target_missing_column() {
    let df = common::create_transactions_dataframe();
    let err = split_by_target(&df, "Price", "Class").unwrap_err();

    assert_eq!(
        err.downcast_ref::<AnalysisError>(),
        Some(&AnalysisError::InvalidColumn("Price".to_string()))
    );
}
