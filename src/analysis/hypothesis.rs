//! Two-sample hypothesis tests

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::analysis::descriptive::numeric_values;
use crate::analysis::error::AnalysisError;

/// Test statistic with its two-sided p-value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

/// Welch's t-test for a difference in means, not assuming equal variances.
///
/// Returns None when either group has fewer than 2 valid numeric values
/// after missing-value removal, or when the pooled standard error is zero.
pub fn welch_t_test(group_a: &Series, group_b: &Series) -> Option<TestOutcome> {
    let a = numeric_values(group_a);
    let b = numeric_values(group_b);
    if a.len() < 2 || b.len() < 2 {
        return None;
    }

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let mean_a = a.iter().sum::<f64>() / na;
    let mean_b = b.iter().sum::<f64>() / nb;
    let var_a = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / (na - 1.0);
    let var_b = b.iter().map(|x| (x - mean_b).powi(2)).sum::<f64>() / (nb - 1.0);

    let se_squared = var_a / na + var_b / nb;
    if se_squared == 0.0 {
        return None;
    }

    let t = (mean_a - mean_b) / se_squared.sqrt();

    // Welch-Satterthwaite degrees of freedom
    let freedom = se_squared.powi(2)
        / ((var_a / na).powi(2) / (na - 1.0) + (var_b / nb).powi(2) / (nb - 1.0));

    let dist = StudentsT::new(0.0, 1.0, freedom).ok()?;
    Some(TestOutcome {
        statistic: t,
        p_value: 2.0 * (1.0 - dist.cdf(t.abs())),
    })
}

/// Two-proportion z-test with a pooled proportion.
///
/// Returns None for the degenerate cases: an empty sample on either side, or
/// a zero pooled standard error (both proportions at the same extreme).
pub fn two_proportion_z_test(
    successes_a: u64,
    n_a: u64,
    successes_b: u64,
    n_b: u64,
) -> Option<TestOutcome> {
    if n_a == 0 || n_b == 0 {
        return None;
    }

    let (na, nb) = (n_a as f64, n_b as f64);
    let p_a = successes_a as f64 / na;
    let p_b = successes_b as f64 / nb;
    let pooled = (successes_a + successes_b) as f64 / (na + nb);

    let se = (pooled * (1.0 - pooled) * (1.0 / na + 1.0 / nb)).sqrt();
    if se == 0.0 {
        return None;
    }

    let z = (p_a - p_b) / se;
    Some(TestOutcome {
        statistic: z,
        p_value: 2.0 * (1.0 - Normal::standard().cdf(z.abs())),
    })
}

/// Split a value column into two groups by the distinct values of a binary
/// target column.
///
/// Rows where either column is missing are dropped. Groups come back in
/// ascending target-value order. Returns `Ok(None)` when the retained target
/// rows do not hold exactly two distinct values; fails when a column is
/// absent.
pub fn split_by_target(
    df: &DataFrame,
    column: &str,
    target: &str,
) -> Result<Option<(Series, Series)>> {
    let values = df
        .column(column)
        .map_err(|_| AnalysisError::InvalidColumn(column.to_string()))?
        .cast(&DataType::Float64)?;
    let targets = df
        .column(target)
        .map_err(|_| AnalysisError::InvalidColumn(target.to_string()))?
        .cast(&DataType::Float64)?;

    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for (v, t) in values.f64()?.into_iter().zip(targets.f64()?.into_iter()) {
        if let (Some(v), Some(t)) = (v, t) {
            if !v.is_nan() && !t.is_nan() {
                pairs.push((v, t));
            }
        }
    }

    let mut distinct: Vec<f64> = Vec::with_capacity(2);
    for &(_, t) in &pairs {
        if !distinct.contains(&t) {
            distinct.push(t);
            if distinct.len() > 2 {
                return Ok(None);
            }
        }
    }
    if distinct.len() != 2 {
        return Ok(None);
    }
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let first: Vec<f64> = pairs
        .iter()
        .filter(|(_, t)| *t == distinct[0])
        .map(|(v, _)| *v)
        .collect();
    let second: Vec<f64> = pairs
        .iter()
        .filter(|(_, t)| *t == distinct[1])
        .map(|(v, _)| *v)
        .collect();

    Ok(Some((
        Series::new(column.into(), first),
        Series::new(column.into(), second),
    )))
}
