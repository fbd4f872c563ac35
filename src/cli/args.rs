//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Fraudlens - descriptive and inferential statistics for transaction datasets
#[derive(Parser, Debug)]
#[command(name = "fraudlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Binary target column (0 = normal, 1 = event)
    #[arg(short, long, default_value = "Class")]
    pub target: String,

    /// Transaction value column used for distribution summaries and tests
    #[arg(short = 'a', long, default_value = "Amount")]
    pub amount_column: String,

    /// Seconds-since-first-observation column used for hourly event rates
    #[arg(long, default_value = "Time")]
    pub time_column: String,

    /// Number of top correlated features to report
    #[arg(short = 'k', long, default_value = "10", value_parser = validate_top_k)]
    pub top_k: usize,

    /// Confidence level for all intervals, strictly between 0 and 1
    #[arg(short = 'c', long, default_value = "0.95", value_parser = validate_confidence)]
    pub confidence: f64,

    /// Interval method for the event proportion: "normal" or "wilson"
    #[arg(long, default_value = "wilson")]
    pub ci_method: String,

    /// Number of bootstrap resamples for the mean CI
    #[arg(long, default_value = "2000")]
    pub bootstrap_resamples: usize,

    /// Seed for the bootstrap pseudorandom stream.
    /// The same seed and input always produce identical intervals.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Optional JSON report output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Validator for the top_k parameter
fn validate_top_k(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("top_k must be greater than 0".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for the confidence parameter
fn validate_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "confidence must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
