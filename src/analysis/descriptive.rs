//! Central tendency and dispersion statistics for a single column

use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Central tendency and dispersion summary of one column.
///
/// `count` is the number of valid numeric values after coercion. Fields that
/// cannot be computed from the remaining values are `None`: variance and
/// standard deviation need at least 2 values (unbiased n-1 denominator),
/// everything else needs at least 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub variance: Option<f64>,
    pub std: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub iqr: Option<f64>,
}

/// Summarize a column: mean, median, mode, variance, std, quartiles, IQR.
///
/// Values are coerced to numeric per-value; entries that fail coercion are
/// dropped, never imputed. Mode ties are broken by the first-encountered
/// value in insertion order.
pub fn summarize(series: &Series) -> DistributionSummary {
    let values = numeric_values(series);
    let count = values.len();

    if count == 0 {
        return DistributionSummary {
            count: 0,
            mean: None,
            median: None,
            mode: None,
            variance: None,
            std: None,
            q1: None,
            q3: None,
            iqr: None,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = percentile(&sorted, 50.0);
    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = match (q1, q3) {
        (Some(lo), Some(hi)) => Some(hi - lo),
        _ => None,
    };

    // Unbiased variance requires at least 2 values
    let variance = if count >= 2 {
        let sum_sq_dev: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        Some(sum_sq_dev / (count - 1) as f64)
    } else {
        None
    };
    let std = variance.map(f64::sqrt);

    DistributionSummary {
        count,
        mean: Some(mean),
        median,
        mode: mode_first_encountered(&values),
        variance,
        std,
        q1,
        q3,
        iqr,
    }
}

/// Coerce a column to valid numeric values.
///
/// Casts to Float64 (failed coercions become null) and drops nulls and NaN.
/// The surviving values keep their original row order.
pub(crate) fn numeric_values(series: &Series) -> Vec<f64> {
    let Ok(float_series) = series.cast(&DataType::Float64) else {
        return Vec::new();
    };
    let Ok(ca) = float_series.f64() else {
        return Vec::new();
    };

    ca.into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect()
}

/// Linear-interpolation percentile of a pre-sorted slice, `pct` in 0..=100.
pub(crate) fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }

    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Most frequent value; ties resolve to the value seen first.
fn mode_first_encountered(values: &[f64]) -> Option<f64> {
    // Key on the bit pattern so equal floats collapse to one entry
    let mut occurrences: HashMap<u64, (usize, usize)> = HashMap::new();

    for (index, &value) in values.iter().enumerate() {
        let entry = occurrences.entry(value.to_bits()).or_insert((0, index));
        entry.0 += 1;
    }

    occurrences
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(bits, _)| f64::from_bits(bits))
}
