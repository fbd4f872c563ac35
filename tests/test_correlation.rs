//! Unit tests for correlation ranking and the correlation matrix

use fraudlens::analysis::{
    correlation_matrix, correlation_with_target, AnalysisError,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_strong_positive_and_negative_correlations_found() {
    let df = common::create_transactions_dataframe();
    let ranked = correlation_with_target(&df, "Class", 10).unwrap();

    let v1 = ranked.iter().find(|e| e.feature == "V1").unwrap();
    assert!(
        v1.r > 0.9,
        "V1 should correlate strongly with Class, got {}",
        v1.r
    );
    assert!(v1.p_value < 1e-6);

    let v2 = ranked.iter().find(|e| e.feature == "V2").unwrap();
    assert!(
        v2.r < -0.9,
        "V2 should correlate strongly negatively with Class, got {}",
        v2.r
    );
}

#[test]
fn test_ranking_ordered_by_descending_magnitude() {
    let df = common::create_transactions_dataframe();
    let ranked = correlation_with_target(&df, "Class", 10).unwrap();

    for window in ranked.windows(2) {
        assert!(
            window[0].r.abs() >= window[1].r.abs(),
            "entries must be ordered by |r| descending: {} before {}",
            window[0].r,
            window[1].r
        );
    }
}

#[test]
fn test_top_k_truncates_results() {
    // 5 qualifying numeric columns, top_k = 3 returns exactly 3
    let df = df! {
        "target" => [0i32, 1, 0, 1, 0, 1, 0, 1],
        "a" => [1.0f64, 8.0, 2.0, 9.0, 3.0, 10.0, 4.0, 11.0],
        "b" => [5.0f64, 1.0, 6.0, 2.0, 7.0, 3.0, 8.0, 4.0],
        "c" => [1.0f64, 2.0, 1.5, 2.5, 1.2, 2.2, 1.8, 2.8],
        "d" => [3.0f64, 3.5, 2.9, 3.6, 3.1, 3.4, 3.0, 3.7],
        "e" => [0.5f64, 1.5, 0.3, 1.8, 0.7, 1.2, 0.4, 1.9],
    }
    .unwrap();

    let ranked = correlation_with_target(&df, "target", 3).unwrap();
    assert_eq!(ranked.len(), 3);

    let all = correlation_with_target(&df, "target", 10).unwrap();
    assert_eq!(all.len(), 5);
}

#[test]
fn test_zero_top_k_is_invalid() {
    let df = common::create_transactions_dataframe();
    let err = correlation_with_target(&df, "Class", 0).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::InvalidArgument(_))
    ));
}

#[test]
fn test_missing_target_column() {
    let df = common::create_transactions_dataframe();
    let err = correlation_with_target(&df, "Label", 5).unwrap_err();

    assert_eq!(
        err.downcast_ref::<AnalysisError>(),
        Some(&AnalysisError::InvalidColumn("Label".to_string()))
    );
}

#[test]
fn test_constant_column_skipped() {
    let df = df! {
        "target" => [0i32, 1, 0, 1, 0, 1],
        "constant" => [5.0f64; 6],
        "varying" => [1.0f64, 2.0, 1.1, 2.1, 0.9, 1.9],
    }
    .unwrap();

    let ranked = correlation_with_target(&df, "target", 10).unwrap();
    assert!(ranked.iter().all(|e| e.feature != "constant"));
    assert!(ranked.iter().any(|e| e.feature == "varying"));
}

#[test]
fn test_non_binary_target_yields_no_entries() {
    let df = df! {
        "target" => [0i32, 1, 2, 0, 1, 2],
        "x" => [1.0f64, 2.0, 3.0, 1.5, 2.5, 3.5],
    }
    .unwrap();

    let ranked = correlation_with_target(&df, "target", 10).unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn test_too_few_paired_observations_skipped() {
    // Only 2 rows where both feature and target are present
    let df = df! {
        "target" => [Some(0i32), Some(1), Some(0), None],
        "x" => [Some(1.0f64), Some(2.0), None, Some(3.0)],
    }
    .unwrap();

    let ranked = correlation_with_target(&df, "target", 10).unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn test_matrix_diagonal_and_symmetry() {
    let df = common::create_transactions_dataframe();
    let matrix = correlation_matrix(&df, &["Time", "Amount", "Class"]).unwrap();

    assert_eq!(matrix.columns, vec!["Time", "Amount", "Class"]);
    for i in 0..3 {
        assert!((matrix.values[i][i] - 1.0).abs() < 1e-9);
        for j in 0..3 {
            assert!(
                (matrix.values[i][j] - matrix.values[j][i]).abs() < 1e-9,
                "matrix must be symmetric"
            );
        }
    }
}

#[test]
fn test_matrix_perfect_linear_relation() {
    let df = df! {
        "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "y" => [2.0f64, 4.0, 6.0, 8.0, 10.0],
    }
    .unwrap();

    let matrix = correlation_matrix(&df, &["x", "y"]).unwrap();
    assert!((matrix.values[0][1] - 1.0).abs() < 1e-9);
}

#[test]
fn test_matrix_constant_column_is_nan() {
    let df = df! {
        "x" => [1.0f64, 2.0, 3.0, 4.0],
        "c" => [7.0f64; 4],
    }
    .unwrap();

    let matrix = correlation_matrix(&df, &["x", "c"]).unwrap();
    assert!(matrix.values[0][1].is_nan());
    assert!((matrix.values[1][1] - 1.0).abs() < 1e-9);
}

#[test]
fn test_matrix_unknown_column() {
    let df = common::create_transactions_dataframe();
    let err = correlation_matrix(&df, &["Time", "Nope"]).unwrap_err();

    assert_eq!(
        err.downcast_ref::<AnalysisError>(),
        Some(&AnalysisError::InvalidColumn("Nope".to_string()))
    );
}
