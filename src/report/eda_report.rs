//! Full analysis report assembly
//!
//! Collects the results of every analysis step into one serializable
//! document for JSON export.

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::analysis::{
    BootstrapCi, ClassCount, ColumnProfile, CorrelationMatrix, DistributionSummary, HourlyRate,
    ProportionCi, TargetCorrelation, TestOutcome,
};

/// Settings used in the analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSettings {
    pub target_column: String,
    pub amount_column: String,
    pub time_column: String,
    pub top_k: usize,
    pub confidence: f64,
    pub ci_method: String,
    pub bootstrap_resamples: usize,
    pub seed: u64,
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    pub fraudlens_version: String,
    pub input_file: String,
    pub settings: AnalysisSettings,
}

/// Distribution summary of the amount column within one class
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub class: String,
    pub summary: DistributionSummary,
}

/// Inference results over the amount column and the observation window
#[derive(Debug, Clone, Default, Serialize)]
pub struct InferenceSection {
    /// Bootstrap CI for the mean amount of the non-event class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_mean_bootstrap_ci: Option<BootstrapCi>,
    /// Welch's t-test: non-event vs event amounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_welch_t_test: Option<TestOutcome>,
    /// Two-proportion z-test: event rate, first vs second half of the window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_z_test: Option<TestOutcome>,
}

/// Complete EDA report
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    pub metadata: ReportMetadata,
    pub variables: Vec<ColumnProfile>,
    pub class_balance: Vec<ClassCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_proportion_ci: Option<ProportionCi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_summary: Option<DistributionSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amount_by_class: Vec<ClassSummary>,
    pub correlations: Vec<TargetCorrelation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_matrix: Option<CorrelationMatrix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hourly_rates: Vec<HourlyRate>,
    pub inference: InferenceSection,
}

/// Incrementally populated report, built step by step as the pipeline runs
pub struct EdaReportBuilder {
    metadata: ReportMetadata,
    variables: Vec<ColumnProfile>,
    class_balance: Vec<ClassCount>,
    event_proportion_ci: Option<ProportionCi>,
    amount_summary: Option<DistributionSummary>,
    amount_by_class: Vec<ClassSummary>,
    correlations: Vec<TargetCorrelation>,
    correlation_matrix: Option<CorrelationMatrix>,
    hourly_rates: Vec<HourlyRate>,
    inference: InferenceSection,
}

impl EdaReportBuilder {
    pub fn new(input_file: &Path, settings: AnalysisSettings) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                fraudlens_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.display().to_string(),
                settings,
            },
            variables: Vec::new(),
            class_balance: Vec::new(),
            event_proportion_ci: None,
            amount_summary: None,
            amount_by_class: Vec::new(),
            correlations: Vec::new(),
            correlation_matrix: None,
            hourly_rates: Vec::new(),
            inference: InferenceSection::default(),
        }
    }

    pub fn set_variables(&mut self, variables: Vec<ColumnProfile>) {
        self.variables = variables;
    }

    pub fn set_class_balance(&mut self, balance: Vec<ClassCount>, ci: Option<ProportionCi>) {
        self.class_balance = balance;
        self.event_proportion_ci = ci;
    }

    pub fn set_amount_summary(
        &mut self,
        overall: DistributionSummary,
        by_class: Vec<ClassSummary>,
    ) {
        self.amount_summary = Some(overall);
        self.amount_by_class = by_class;
    }

    pub fn set_correlations(
        &mut self,
        ranked: Vec<TargetCorrelation>,
        matrix: Option<CorrelationMatrix>,
    ) {
        self.correlations = ranked;
        self.correlation_matrix = matrix;
    }

    pub fn set_hourly_rates(&mut self, rates: Vec<HourlyRate>) {
        self.hourly_rates = rates;
    }

    pub fn set_inference(&mut self, inference: InferenceSection) {
        self.inference = inference;
    }

    pub fn build(self) -> EdaReport {
        EdaReport {
            metadata: self.metadata,
            variables: self.variables,
            class_balance: self.class_balance,
            event_proportion_ci: self.event_proportion_ci,
            amount_summary: self.amount_summary,
            amount_by_class: self.amount_by_class,
            correlations: self.correlations,
            correlation_matrix: self.correlation_matrix,
            hourly_rates: self.hourly_rates,
            inference: self.inference,
        }
    }
}
