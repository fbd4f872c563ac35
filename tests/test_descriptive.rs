//! Unit tests for central tendency and dispersion summaries

use fraudlens::analysis::summarize;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

const TOLERANCE: f64 = 1e-9;

#[test]
fn test_summarize_known_values() {
    let series = Series::new("x".into(), [1.0f64, 2.0, 2.0, 3.0, 4.0]);
    let summary = summarize(&series);

    assert_eq!(summary.count, 5);
    assert!((summary.mean.unwrap() - 2.4).abs() < TOLERANCE);
    assert!((summary.median.unwrap() - 2.0).abs() < TOLERANCE);
    assert!((summary.mode.unwrap() - 2.0).abs() < TOLERANCE);
    assert!((summary.variance.unwrap() - 1.3).abs() < TOLERANCE);
    assert!((summary.q1.unwrap() - 2.0).abs() < TOLERANCE);
    assert!((summary.q3.unwrap() - 3.0).abs() < TOLERANCE);
    assert!((summary.iqr.unwrap() - 1.0).abs() < TOLERANCE);
}

#[test]
fn test_std_squared_equals_variance() {
    let df = common::create_transactions_dataframe();
    let amount = df.column("Amount").unwrap().as_materialized_series();
    let summary = summarize(amount);

    let std = summary.std.unwrap();
    let variance = summary.variance.unwrap();
    assert!(
        (std * std - variance).abs() < 1e-9,
        "std^2 ({}) should equal variance ({})",
        std * std,
        variance
    );
}

#[test]
fn test_summarize_single_value() {
    let series = Series::new("x".into(), [7.0f64]);
    let summary = summarize(&series);

    assert_eq!(summary.count, 1);
    assert_eq!(summary.mean, Some(7.0));
    assert_eq!(summary.median, Some(7.0));
    assert_eq!(summary.mode, Some(7.0));
    // Unbiased variance is undefined for a single observation
    assert_eq!(summary.variance, None);
    assert_eq!(summary.std, None);
}

#[test]
fn test_summarize_empty_series() {
    let series = Series::new("x".into(), Vec::<f64>::new());
    let summary = summarize(&series);

    assert_eq!(summary.count, 0);
    assert_eq!(summary.mean, None);
    assert_eq!(summary.median, None);
    assert_eq!(summary.mode, None);
    assert_eq!(summary.variance, None);
    assert_eq!(summary.q1, None);
    assert_eq!(summary.iqr, None);
}

#[test]
fn test_summarize_all_null() {
    let series = Series::new("x".into(), [None::<f64>, None, None]);
    let summary = summarize(&series);

    assert_eq!(summary.count, 0);
    assert_eq!(summary.mode, None);
}

#[test]
fn test_summarize_coerces_strings_per_value() {
    // Failed coercions drop individual values, not the whole call
    let series = Series::new("x".into(), ["10", "20", "oops", "30"]);
    let summary = summarize(&series);

    assert_eq!(summary.count, 3);
    assert!((summary.mean.unwrap() - 20.0).abs() < TOLERANCE);
}

#[test]
fn test_summarize_drops_nan() {
    let series = Series::new("x".into(), [1.0f64, f64::NAN, 3.0]);
    let summary = summarize(&series);

    assert_eq!(summary.count, 2);
    assert!((summary.mean.unwrap() - 2.0).abs() < TOLERANCE);
}

#[test]
fn test_mode_tie_broken_by_first_encountered() {
    let series = Series::new("x".into(), [3.0f64, 1.0, 3.0, 1.0, 2.0]);
    let summary = summarize(&series);

    assert_eq!(summary.mode, Some(3.0));
}

#[test]
fn test_summarize_two_values_defines_dispersion() {
    let series = Series::new("x".into(), [2.0f64, 4.0]);
    let summary = summarize(&series);

    assert!((summary.variance.unwrap() - 2.0).abs() < TOLERANCE);
    assert!((summary.std.unwrap() - 2.0f64.sqrt()).abs() < TOLERANCE);
}
