//! Event rates by hour of day
//!
//! Buckets a seconds-since-first-observation column into hour-of-day and
//! reports how many rows and target events fall into each bucket.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::analysis::error::AnalysisError;

/// Rate band thresholds: below 0.15% is routine, above 0.25% warrants
/// reinforced monitoring
const WATCH_RATE: f64 = 0.0015;
const CRITICAL_RATE: f64 = 0.0025;

/// Risk classification of an hourly event rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Watch,
    Critical,
}

/// Row and event counts for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRate {
    pub hour: u32,
    pub total: u64,
    pub events: u64,
    /// Fraction of rows in this hour that are events
    pub rate: f64,
}

impl HourlyRate {
    pub fn band(&self) -> RiskBand {
        if self.rate > CRITICAL_RATE {
            RiskBand::Critical
        } else if self.rate >= WATCH_RATE {
            RiskBand::Watch
        } else {
            RiskBand::Low
        }
    }
}

/// Event rate per hour of day, ascending by hour.
///
/// `time_column` holds seconds since the first observation; the hour of day
/// is `(seconds / 3600) mod 24`. Rows with a missing time or target are
/// skipped, and hours with no rows are omitted.
pub fn event_rate_by_hour(
    df: &DataFrame,
    time_column: &str,
    target: &str,
) -> Result<Vec<HourlyRate>> {
    let times = df
        .column(time_column)
        .map_err(|_| AnalysisError::InvalidColumn(time_column.to_string()))?
        .cast(&DataType::Float64)?;
    let targets = df
        .column(target)
        .map_err(|_| AnalysisError::InvalidColumn(target.to_string()))?
        .cast(&DataType::Float64)?;

    let mut totals = [0u64; 24];
    let mut events = [0u64; 24];

    for (t, y) in times.f64()?.into_iter().zip(targets.f64()?.into_iter()) {
        if let (Some(t), Some(y)) = (t, y) {
            if t.is_nan() || y.is_nan() {
                continue;
            }
            let hour = ((t / 3600.0).floor() as i64).rem_euclid(24) as usize;
            totals[hour] += 1;
            if y != 0.0 {
                events[hour] += 1;
            }
        }
    }

    let rates = (0..24)
        .filter(|&h| totals[h] > 0)
        .map(|h| HourlyRate {
            hour: h as u32,
            total: totals[h],
            events: events[h],
            rate: events[h] as f64 / totals[h] as f64,
        })
        .collect();

    Ok(rates)
}
