//! Fraudlens: Transaction Dataset Analysis CLI
//!
//! A command-line tool for exploratory statistical analysis of transaction
//! datasets: variable structure, class balance, distribution summaries,
//! correlation ranking, confidence intervals, and hypothesis tests.

mod analysis;
mod cli;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use polars::prelude::*;

use analysis::{
    bootstrap_ci_mean, ci_for_proportion, class_balance, correlation_matrix,
    correlation_with_target, describe_variables, event_rate_by_hour, load_dataset_collected,
    split_by_target, summarize, two_proportion_z_test, welch_t_test, CiMethod, RiskBand,
    TestOutcome,
};
use report::{
    display_amount_summary, display_class_balance, display_correlation_matrix,
    display_correlations, display_hourly_rates, display_inference, display_variables,
    export_eda_report, AnalysisSettings, ClassSummary, EdaReportBuilder, EdaSummary,
    InferenceSection,
};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success, print_warning, SAVE,
};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let ci_method: CiMethod = cli.ci_method.parse()?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.target,
        &cli.amount_column,
        cli.confidence,
        &cli.ci_method,
        cli.top_k,
    );

    let run_start = Instant::now();
    println!();
    let (df, rows, cols, memory_mb) = load_dataset_collected(&cli.input, cli.infer_schema_length)?;
    print_success("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if !column_names.contains(&cli.target) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            cli.target,
            column_names
        );
    }

    let mut report = EdaReportBuilder::new(
        &cli.input,
        AnalysisSettings {
            target_column: cli.target.clone(),
            amount_column: cli.amount_column.clone(),
            time_column: cli.time_column.clone(),
            top_k: cli.top_k,
            confidence: cli.confidence,
            ci_method: ci_method.to_string(),
            bootstrap_resamples: cli.bootstrap_resamples,
            seed: cli.seed,
        },
    );

    // Step 1: Variable structure and summary
    print_step_header(1, "Variable Structure");
    let step_start = Instant::now();
    let profiles = describe_variables(&df)?;
    display_variables(&profiles);
    report.set_variables(profiles);
    print_step_time(step_start.elapsed());

    // Step 2: Class balance with a CI for the event proportion
    print_step_header(2, "Class Balance");
    let step_start = Instant::now();
    let balance = class_balance(&df, &cli.target)?;
    let total_classified: usize = balance.iter().map(|c| c.count).sum();

    // Event class = the higher of the two target values (1 for 0/1 targets)
    let event_class = if balance.len() == 2 { balance.last() } else { None };
    let event_ci = event_class.and_then(|class| {
        ci_for_proportion(
            class.count as u64,
            total_classified as u64,
            cli.confidence,
            ci_method,
        )
        .ok()
    });

    display_class_balance(&balance, event_ci.as_ref(), cli.confidence);
    if let Some(class) = event_class {
        if class.proportion < 0.01 {
            print_warning(&format!(
                "Severely imbalanced target: {:.4}% of rows are class {}",
                class.proportion * 100.0,
                class.value
            ));
        }
    }

    let event_rate = event_class.map(|c| c.proportion);
    let class_labels: Option<(String, String)> = if balance.len() == 2 {
        Some((balance[0].value.clone(), balance[1].value.clone()))
    } else {
        None
    };
    report.set_class_balance(balance, event_ci);
    print_step_time(step_start.elapsed());

    // Step 3: Distribution of the amount column, overall and per class
    print_step_header(3, &format!("Distribution of '{}'", cli.amount_column));
    let step_start = Instant::now();
    let amount_groups = if column_names.contains(&cli.amount_column) {
        let amount = df
            .column(&cli.amount_column)?
            .as_materialized_series()
            .clone();
        let overall = summarize(&amount);

        let groups = split_by_target(&df, &cli.amount_column, &cli.target)?;
        let mut by_class = Vec::new();
        if let (Some((non_event, event)), Some((label_a, label_b))) = (&groups, &class_labels) {
            by_class.push(ClassSummary {
                class: label_a.clone(),
                summary: summarize(non_event),
            });
            by_class.push(ClassSummary {
                class: label_b.clone(),
                summary: summarize(event),
            });
        }

        display_amount_summary(&cli.amount_column, &overall, &by_class);
        report.set_amount_summary(overall, by_class);
        groups
    } else {
        print_info(&format!(
            "Column '{}' not present - skipping distribution summary",
            cli.amount_column
        ));
        None
    };
    print_step_time(step_start.elapsed());

    // Step 4: Correlation ranking against the target
    print_step_header(4, "Correlation with Target");
    let step_start = Instant::now();
    let spinner = create_spinner("Ranking point-biserial correlations...");
    let ranked = correlation_with_target(&df, &cli.target, cli.top_k)?;
    finish_with_success(&spinner, &format!("Ranked {} feature(s)", ranked.len()));

    display_correlations(&cli.target, &ranked);
    let top_feature = ranked.first().map(|e| (e.feature.clone(), e.r));

    let matrix_columns: Vec<&str> = [&cli.time_column, &cli.amount_column, &cli.target]
        .into_iter()
        .filter(|name| column_names.contains(*name))
        .map(|name| name.as_str())
        .collect();
    let matrix = if matrix_columns.len() >= 2 {
        let m = correlation_matrix(&df, &matrix_columns)?;
        println!();
        display_correlation_matrix(&m);
        Some(m)
    } else {
        None
    };
    report.set_correlations(ranked, matrix);
    print_step_time(step_start.elapsed());

    // Step 5: Event rate by hour of day
    print_step_header(5, "Event Rate by Hour");
    let step_start = Instant::now();
    if column_names.contains(&cli.time_column) {
        let rates = event_rate_by_hour(&df, &cli.time_column, &cli.target)?;
        display_hourly_rates(&rates);

        let critical: Vec<String> = rates
            .iter()
            .filter(|r| r.band() == RiskBand::Critical)
            .map(|r| format!("{:02}h", r.hour))
            .collect();
        if !critical.is_empty() {
            print_warning(&format!(
                "Hours above the critical event rate: {}",
                critical.join(", ")
            ));
        }
        report.set_hourly_rates(rates);
    } else {
        print_info(&format!(
            "Column '{}' not present - skipping hourly rates",
            cli.time_column
        ));
    }
    print_step_time(step_start.elapsed());

    // Step 6: Confidence intervals and hypothesis tests
    print_step_header(6, "Confidence Intervals & Hypothesis Tests");
    let step_start = Instant::now();
    let mut inference = InferenceSection::default();

    if let Some((non_event, event)) = &amount_groups {
        let spinner = create_spinner(&format!(
            "Bootstrapping mean of '{}' ({} resamples)...",
            cli.amount_column, cli.bootstrap_resamples
        ));
        inference.amount_mean_bootstrap_ci =
            bootstrap_ci_mean(non_event, cli.confidence, cli.bootstrap_resamples, cli.seed)?;
        spinner.finish_and_clear();

        inference.amount_welch_t_test = welch_t_test(non_event, event);
    }

    if column_names.contains(&cli.time_column) {
        inference.window_z_test = window_shift_test(&df, &cli.time_column, &cli.target)?;
    }

    display_inference(&inference, cli.confidence);
    let mean_difference_significant = inference
        .amount_welch_t_test
        .as_ref()
        .map(|test| test.p_value < 0.05);
    report.set_inference(inference);
    print_step_time(step_start.elapsed());

    // Closing summary and optional export
    EdaSummary {
        rows,
        columns: cols,
        event_rate,
        top_feature,
        mean_difference_significant,
    }
    .display();

    if let Some(path) = &cli.output {
        export_eda_report(&report.build(), path)?;
        println!();
        print_success(&format!("{}Report exported to {}", SAVE, path.display()));
    }

    print_completion(run_start.elapsed());
    Ok(())
}

/// Two-proportion z-test of the event rate between the first and second half
/// of the observation window (split at the median time).
fn window_shift_test(
    df: &DataFrame,
    time_column: &str,
    target: &str,
) -> Result<Option<TestOutcome>> {
    let times = df.column(time_column)?.cast(&DataType::Float64)?;
    let targets = df.column(target)?.cast(&DataType::Float64)?;

    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for (t, y) in times.f64()?.into_iter().zip(targets.f64()?.into_iter()) {
        if let (Some(t), Some(y)) = (t, y) {
            if !t.is_nan() && !y.is_nan() {
                pairs.push((t, y));
            }
        }
    }
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut sorted_times: Vec<f64> = pairs.iter().map(|(t, _)| *t).collect();
    sorted_times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let split = sorted_times[sorted_times.len() / 2];

    let (mut n_first, mut events_first, mut n_second, mut events_second) = (0u64, 0u64, 0u64, 0u64);
    for (t, y) in pairs {
        if t < split {
            n_first += 1;
            if y != 0.0 {
                events_first += 1;
            }
        } else {
            n_second += 1;
            if y != 0.0 {
                events_second += 1;
            }
        }
    }

    Ok(two_proportion_z_test(
        events_first,
        n_first,
        events_second,
        n_second,
    ))
}
