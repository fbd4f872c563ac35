//! Correlation between numeric features and the binary target

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::analysis::error::AnalysisError;

/// Minimum paired observations required before a column is ranked
const MIN_PAIRED_OBSERVATIONS: usize = 3;

/// Point-biserial correlation of one feature against the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCorrelation {
    pub feature: String,
    pub r: f64,
    pub p_value: f64,
}

/// Pearson correlation matrix over a set of named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Rank numeric features by point-biserial correlation with a binary target.
///
/// Point-biserial correlation is the Pearson correlation between a continuous
/// column and a strictly two-valued one; the two-sided p-value comes from
/// Student's t with n-2 degrees of freedom. A column is skipped when fewer
/// than 3 valid paired rows remain after missing-value removal, or when the
/// retained target rows do not hold exactly two distinct values.
///
/// Results are ordered by descending |r|; ties keep the original column
/// order. At most `top_k` entries are returned.
pub fn correlation_with_target(
    df: &DataFrame,
    target: &str,
    top_k: usize,
) -> Result<Vec<TargetCorrelation>> {
    if top_k == 0 {
        return Err(AnalysisError::InvalidArgument("top_k must be > 0".to_string()).into());
    }

    let target_col = df
        .column(target)
        .map_err(|_| AnalysisError::InvalidColumn(target.to_string()))?;
    let y = target_col.cast(&DataType::Float64)?;
    let y = y.f64()?.clone();

    // Numeric feature columns in original order, pre-cast to Float64
    let float_columns: Vec<(String, Float64Chunked)> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric() && col.name().as_str() != target)
        .filter_map(|col| {
            let cast = col.cast(&DataType::Float64).ok()?;
            let ca = cast.as_materialized_series().f64().ok()?.clone();
            Some((col.name().to_string(), ca))
        })
        .collect();

    // par_iter preserves input order, so stable sort below keeps column
    // order for |r| ties
    let mut ranked: Vec<TargetCorrelation> = float_columns
        .par_iter()
        .filter_map(|(name, ca)| {
            let (r, p_value) = point_biserial(ca, &y)?;
            Some(TargetCorrelation {
                feature: name.clone(),
                r,
                p_value,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.r.abs()
            .partial_cmp(&a.r.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_k);

    Ok(ranked)
}

/// Correlation and p-value for one feature, or None when the column is
/// skipped (too few pairs, non-binary target, or zero variance).
fn point_biserial(x: &Float64Chunked, y: &Float64Chunked) -> Option<(f64, f64)> {
    if x.len() != y.len() {
        return None;
    }

    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for (xv, yv) in x.into_iter().zip(y.into_iter()) {
        if let (Some(xv), Some(yv)) = (xv, yv) {
            if !xv.is_nan() && !yv.is_nan() {
                pairs.push((xv, yv));
            }
        }
    }

    let n = pairs.len();
    if n < MIN_PAIRED_OBSERVATIONS {
        return None;
    }

    let mut distinct_targets: Vec<f64> = Vec::with_capacity(2);
    for &(_, yv) in &pairs {
        if !distinct_targets.contains(&yv) {
            distinct_targets.push(yv);
            if distinct_targets.len() > 2 {
                return None;
            }
        }
    }
    if distinct_targets.len() != 2 {
        return None;
    }

    let r = pearson_correlation(&pairs)?;
    Some((r, two_sided_p_value(r, n)?))
}

/// Single-pass Welford Pearson correlation over paired observations.
///
/// Returns None when either side has zero variance.
fn pearson_correlation(pairs: &[(f64, f64)]) -> Option<f64> {
    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for &(x, y) in pairs {
        count += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if count == 0.0 {
        return None;
    }

    let std_x = (var_x / count).sqrt();
    let std_y = (var_y / count).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (count * std_x * std_y))
}

/// Two-sided p-value for a sample correlation via the t transform.
fn two_sided_p_value(r: f64, n: usize) -> Option<f64> {
    let freedom = (n - 2) as f64;
    let denominator = 1.0 - r * r;
    if denominator <= 0.0 {
        // |r| == 1: the t statistic diverges
        return Some(0.0);
    }

    let t = r * (freedom / denominator).sqrt();
    let dist = StudentsT::new(0.0, 1.0, freedom).ok()?;
    Some(2.0 * (1.0 - dist.cdf(t.abs())))
}

/// Compute the Pearson correlation matrix over the named columns.
///
/// Rows with a missing value in any of the selected columns are excluded
/// (listwise deletion), then the matrix is computed as `Z^T * Z` over the
/// standardized data. Entries involving a constant column are NaN; the
/// diagonal is always 1.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> Result<CorrelationMatrix> {
    let mut casts: Vec<Float64Chunked> = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| AnalysisError::InvalidColumn(name.to_string()))?;
        let cast = column.cast(&DataType::Float64)?;
        casts.push(cast.as_materialized_series().f64()?.clone());
    }

    let n_cols = columns.len();
    let names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

    // Listwise deletion: keep only rows valid in every selected column
    let mut rows: Vec<Vec<f64>> = Vec::new();
    'rows: for i in 0..df.height() {
        let mut row = Vec::with_capacity(n_cols);
        for ca in &casts {
            match ca.get(i) {
                Some(v) if !v.is_nan() => row.push(v),
                _ => continue 'rows,
            }
        }
        rows.push(row);
    }

    let n_rows = rows.len();
    if n_rows == 0 {
        return Ok(CorrelationMatrix {
            columns: names,
            values: vec![vec![f64::NAN; n_cols]; n_cols],
        });
    }

    // Standardize each column; constant columns are flagged and zeroed so
    // the multiplication stays well-defined
    let mut constant = vec![false; n_cols];
    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for j in 0..n_cols {
        let mean = rows.iter().map(|r| r[j]).sum::<f64>() / n_rows as f64;
        let var = rows.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n_rows as f64;
        let std = var.sqrt();

        if std == 0.0 {
            constant[j] = true;
            continue;
        }
        let scale = 1.0 / (n_rows as f64).sqrt();
        for (i, row) in rows.iter().enumerate() {
            z[(i, j)] = scale * (row[j] - mean) / std;
        }
    }

    let product = z.transpose() * &z;

    let mut values = vec![vec![f64::NAN; n_cols]; n_cols];
    for i in 0..n_cols {
        for j in 0..n_cols {
            values[i][j] = if i == j {
                1.0
            } else if constant[i] || constant[j] {
                f64::NAN
            } else {
                product[(i, j)]
            };
        }
    }

    Ok(CorrelationMatrix {
        columns: names,
        values,
    })
}
