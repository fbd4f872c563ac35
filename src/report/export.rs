//! JSON export of the analysis report

use std::path::Path;

use anyhow::{Context, Result};

use crate::report::EdaReport;

/// Write the report as pretty-printed JSON.
pub fn export_eda_report(report: &EdaReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize EDA report")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(())
}
