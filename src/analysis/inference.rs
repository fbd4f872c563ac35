//! Confidence intervals: proportion (normal/Wilson) and bootstrap mean

use std::str::FromStr;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::analysis::descriptive::{numeric_values, percentile};
use crate::analysis::error::AnalysisError;

/// Interval construction method for a binomial proportion.
///
/// The normal (Wald) interval is kept for parity with textbook usage even
/// though it behaves poorly for small n or extreme proportions; Wilson is
/// numerically stable near 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CiMethod {
    Normal,
    Wilson,
}

impl FromStr for CiMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(CiMethod::Normal),
            "wilson" => Ok(CiMethod::Wilson),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown CI method '{}': expected 'normal' or 'wilson'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for CiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CiMethod::Normal => write!(f, "normal"),
            CiMethod::Wilson => write!(f, "wilson"),
        }
    }
}

/// Confidence interval for a binomial proportion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionCi {
    pub p_hat: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Percentile bootstrap confidence interval for a mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapCi {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Confidence interval for a proportion of `successes` in `n` trials.
pub fn ci_for_proportion(
    successes: u64,
    n: u64,
    confidence: f64,
    method: CiMethod,
) -> Result<ProportionCi, AnalysisError> {
    if n == 0 {
        return Err(AnalysisError::InvalidArgument(
            "sample size n must be positive".to_string(),
        ));
    }
    if successes > n {
        return Err(AnalysisError::InvalidArgument(format!(
            "successes ({}) exceed sample size ({})",
            successes, n
        )));
    }
    validate_confidence(confidence)?;

    let p_hat = successes as f64 / n as f64;
    let n = n as f64;
    let z = critical_value(confidence);

    let ci = match method {
        CiMethod::Normal => {
            let se = (p_hat * (1.0 - p_hat) / n).sqrt();
            ProportionCi {
                p_hat,
                lower: p_hat - z * se,
                upper: p_hat + z * se,
            }
        }
        CiMethod::Wilson => {
            let denominator = 1.0 + z * z / n;
            let center = (p_hat + z * z / (2.0 * n)) / denominator;
            let half_width =
                z * ((p_hat * (1.0 - p_hat) + z * z / (4.0 * n)) / n).sqrt() / denominator;
            ProportionCi {
                p_hat,
                lower: center - half_width,
                upper: center + half_width,
            }
        }
    };

    Ok(ci)
}

/// Percentile bootstrap CI for the mean of a column.
///
/// Draws `n_resamples` resamples with replacement from the deterministic
/// stream seeded by `seed`; the same seed and input always yield bit-identical
/// output. An empty column (after numeric coercion) yields `Ok(None)`.
pub fn bootstrap_ci_mean(
    series: &Series,
    confidence: f64,
    n_resamples: usize,
    seed: u64,
) -> Result<Option<BootstrapCi>, AnalysisError> {
    validate_confidence(confidence)?;
    if n_resamples == 0 {
        return Err(AnalysisError::InvalidArgument(
            "n_resamples must be > 0".to_string(),
        ));
    }

    let values = numeric_values(series);
    let n = values.len();
    if n == 0 {
        return Ok(None);
    }

    let observed_mean = values.iter().sum::<f64>() / n as f64;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut resample_means = Vec::with_capacity(n_resamples);
    for _ in 0..n_resamples {
        let mut sum = 0.0;
        for _ in 0..n {
            sum += values[rng.gen_range(0..n)];
        }
        resample_means.push(sum / n as f64);
    }

    resample_means.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let tail = (1.0 - confidence) / 2.0 * 100.0;
    // Non-empty by construction, so the percentiles are always defined
    let lower = percentile(&resample_means, tail).unwrap_or(observed_mean);
    let upper = percentile(&resample_means, 100.0 - tail).unwrap_or(observed_mean);

    Ok(Some(BootstrapCi {
        mean: observed_mean,
        lower,
        upper,
    }))
}

fn validate_confidence(confidence: f64) -> Result<(), AnalysisError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AnalysisError::InvalidArgument(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )));
    }
    Ok(())
}

/// Two-sided critical value of the standard normal for the given confidence.
pub(crate) fn critical_value(confidence: f64) -> f64 {
    Normal::standard().inverse_cdf(1.0 - (1.0 - confidence) / 2.0)
}
