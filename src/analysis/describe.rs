//! Dataset structure helpers: per-column profiles and class balance

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::analysis::descriptive::{numeric_values, percentile};
use crate::analysis::error::AnalysisError;

/// Summary statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericProfile {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Summary statistics for a non-numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalProfile {
    pub unique: usize,
    /// Most frequent value; ties resolve to the value seen first
    pub top: Option<String>,
    pub freq: usize,
}

/// Declared type and summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub count: usize,
    pub null_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalProfile>,
}

/// One distinct target value with its count and proportion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCount {
    pub value: String,
    pub count: usize,
    pub proportion: f64,
}

/// Report the declared type and a standard summary for every column.
///
/// Numeric columns get count/mean/std/min/quartiles/max; other columns get
/// count/unique/top/freq. An empty dataset yields an empty vec.
pub fn describe_variables(df: &DataFrame) -> Result<Vec<ColumnProfile>> {
    let mut profiles = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let null_count = series.null_count();
        let count = series.len() - null_count;

        let (numeric, categorical) = if column.dtype().is_primitive_numeric() {
            (Some(numeric_profile(series)), None)
        } else {
            (None, Some(categorical_profile(series)?))
        };

        profiles.push(ColumnProfile {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            count,
            null_count,
            numeric,
            categorical,
        });
    }

    Ok(profiles)
}

fn numeric_profile(series: &Series) -> NumericProfile {
    let mut values = numeric_values(series);
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    };
    let std = if values.len() >= 2 {
        let m = mean.unwrap_or(0.0);
        let sum_sq_dev: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
        Some((sum_sq_dev / (values.len() - 1) as f64).sqrt())
    } else {
        None
    };

    NumericProfile {
        mean,
        std,
        min: values.first().copied(),
        q1: percentile(&values, 25.0),
        median: percentile(&values, 50.0),
        q3: percentile(&values, 75.0),
        max: values.last().copied(),
    }
}

fn categorical_profile(series: &Series) -> Result<CategoricalProfile> {
    let values = column_to_string_values(series)?;

    let mut occurrences: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, value) in values.iter().enumerate() {
        if let Some(v) = value {
            let entry = occurrences.entry(v.as_str()).or_insert((0, index));
            entry.0 += 1;
        }
    }

    let top = occurrences
        .iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (count, _))| (value.to_string(), *count));

    Ok(CategoricalProfile {
        unique: occurrences.len(),
        freq: top.as_ref().map(|(_, count)| *count).unwrap_or(0),
        top: top.map(|(value, _)| value),
    })
}

/// Count rows per distinct target value, sorted ascending by value.
///
/// Proportions are relative to the non-null rows and sum to 1.0 within
/// floating tolerance. Fails when the target column is absent.
pub fn class_balance(df: &DataFrame, target: &str) -> Result<Vec<ClassCount>> {
    let column = df
        .column(target)
        .map_err(|_| AnalysisError::InvalidColumn(target.to_string()))?;

    let values = column_to_string_values(column.as_materialized_series())?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Ok(Vec::new());
    }

    let mut balance: Vec<ClassCount> = counts
        .into_iter()
        .map(|(value, count)| ClassCount {
            value,
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();

    // Numeric values sort by magnitude, anything else lexicographically
    balance.sort_by(|a, b| match (a.value.parse::<f64>(), b.value.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => a.value.cmp(&b.value),
    });

    Ok(balance)
}

/// Convert a column to owned strings for counting and comparison.
fn column_to_string_values(series: &Series) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Boolean => series
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        dtype if dtype.is_integer() => {
            let cast = series.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        dtype if dtype.is_float() => {
            let cast = series.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        _ => {
            let cast = series.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
