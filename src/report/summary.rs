//! Console rendering of analysis results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::analysis::{
    ClassCount, ColumnProfile, CorrelationMatrix, DistributionSummary, HourlyRate, ProportionCi,
    RiskBand, TargetCorrelation,
};
use crate::report::{ClassSummary, InferenceSection};

/// Significance level used when phrasing test verdicts
const ALPHA: f64 = 0.05;

/// Render the per-column structure and summary table
pub fn display_variables(profiles: &[ColumnProfile]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Nulls").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Std").add_attribute(Attribute::Bold),
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("Median").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
    ]);

    for profile in profiles {
        let (mean, std, min, median, max) = match &profile.numeric {
            Some(num) => (
                fmt_opt(num.mean),
                fmt_opt(num.std),
                fmt_opt(num.min),
                fmt_opt(num.median),
                fmt_opt(num.max),
            ),
            None => {
                let cat = profile.categorical.as_ref();
                (
                    cat.map(|c| format!("unique: {}", c.unique))
                        .unwrap_or_default(),
                    cat.and_then(|c| c.top.clone())
                        .map(|top| format!("top: {}", top))
                        .unwrap_or_default(),
                    String::new(),
                    String::new(),
                    String::new(),
                )
            }
        };

        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(&profile.dtype).fg(Color::Cyan),
            Cell::new(profile.count),
            Cell::new(profile.null_count).fg(if profile.null_count > 0 {
                Color::Yellow
            } else {
                Color::White
            }),
            Cell::new(mean),
            Cell::new(std),
            Cell::new(min),
            Cell::new(median),
            Cell::new(max),
        ]);
    }

    print_table(&table);
}

/// Render class counts and proportions, with the CI for the event class
pub fn display_class_balance(
    balance: &[ClassCount],
    event_ci: Option<&ProportionCi>,
    confidence: f64,
) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Class").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Proportion").add_attribute(Attribute::Bold),
    ]);

    for class in balance {
        table.add_row(vec![
            Cell::new(&class.value),
            Cell::new(class.count),
            Cell::new(format!("{:.4}%", class.proportion * 100.0)),
        ]);
    }

    print_table(&table);

    if let Some(ci) = event_ci {
        println!(
            "    {} {:.0}% CI for the event proportion: {:.5}% – {:.5}%",
            style("•").dim(),
            confidence * 100.0,
            ci.lower * 100.0,
            ci.upper * 100.0
        );
    }
}

/// Render the amount distribution, overall and per class
pub fn display_amount_summary(
    column: &str,
    overall: &DistributionSummary,
    by_class: &[ClassSummary],
) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Median").add_attribute(Attribute::Bold),
        Cell::new("Mode").add_attribute(Attribute::Bold),
        Cell::new("Std").add_attribute(Attribute::Bold),
        Cell::new("Q1").add_attribute(Attribute::Bold),
        Cell::new("Q3").add_attribute(Attribute::Bold),
        Cell::new("IQR").add_attribute(Attribute::Bold),
    ]);

    table.add_row(summary_row(&format!("{} (all)", column), overall));
    for class in by_class {
        table.add_row(summary_row(
            &format!("{} (class {})", column, class.class),
            &class.summary,
        ));
    }

    print_table(&table);
}

fn summary_row(label: &str, summary: &DistributionSummary) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(summary.count),
        Cell::new(fmt_opt(summary.mean)),
        Cell::new(fmt_opt(summary.median)),
        Cell::new(fmt_opt(summary.mode)),
        Cell::new(fmt_opt(summary.std)),
        Cell::new(fmt_opt(summary.q1)),
        Cell::new(fmt_opt(summary.q3)),
        Cell::new(fmt_opt(summary.iqr)),
    ]
}

/// Render the ranked point-biserial correlations
pub fn display_correlations(target: &str, ranked: &[TargetCorrelation]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new(format!("r vs {}", target)).add_attribute(Attribute::Bold),
        Cell::new("p-value").add_attribute(Attribute::Bold),
    ]);

    for (rank, entry) in ranked.iter().enumerate() {
        let color = if entry.r.abs() >= 0.3 {
            Color::Green
        } else if entry.r.abs() >= 0.1 {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.feature),
            Cell::new(format!("{:+.4}", entry.r)).fg(color),
            Cell::new(fmt_num(entry.p_value)),
        ]);
    }

    print_table(&table);
}

/// Render a small correlation matrix
pub fn display_correlation_matrix(matrix: &CorrelationMatrix) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new("").add_attribute(Attribute::Bold)];
    header.extend(
        matrix
            .columns
            .iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for (i, name) in matrix.columns.iter().enumerate() {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        for value in &matrix.values[i] {
            row.push(if value.is_nan() {
                Cell::new("-")
            } else {
                Cell::new(format!("{:+.3}", value))
            });
        }
        table.add_row(row);
    }

    print_table(&table);
}

/// Render hourly event rates with their risk bands
pub fn display_hourly_rates(rates: &[HourlyRate]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Hour").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("Events").add_attribute(Attribute::Bold),
        Cell::new("Rate").add_attribute(Attribute::Bold),
        Cell::new("Band").add_attribute(Attribute::Bold),
    ]);

    for rate in rates {
        let (label, color) = match rate.band() {
            RiskBand::Low => ("low", Color::Green),
            RiskBand::Watch => ("watch", Color::Yellow),
            RiskBand::Critical => ("critical", Color::Red),
        };
        table.add_row(vec![
            Cell::new(format!("{:02}h", rate.hour)),
            Cell::new(rate.total),
            Cell::new(rate.events),
            Cell::new(format!("{:.4}%", rate.rate * 100.0)),
            Cell::new(label).fg(color),
        ]);
    }

    print_table(&table);
}

/// Render the inference section: bootstrap CI and hypothesis tests
pub fn display_inference(inference: &InferenceSection, confidence: f64) {
    if let Some(ci) = &inference.amount_mean_bootstrap_ci {
        println!(
            "    {} Bootstrap {:.0}% CI for the non-event mean amount: {:.2} ({:.2} – {:.2})",
            style("•").dim(),
            confidence * 100.0,
            ci.mean,
            ci.lower,
            ci.upper
        );
    }

    match &inference.amount_welch_t_test {
        Some(test) => {
            let verdict = if test.p_value < ALPHA {
                style("significant difference in means").green().bold()
            } else {
                style("no significant difference in means").yellow()
            };
            println!(
                "    {} Welch's t-test (non-event vs event amounts): t = {:.3}, p = {} → {}",
                style("•").dim(),
                test.statistic,
                fmt_num(test.p_value),
                verdict
            );
        }
        None => println!(
            "    {} Welch's t-test skipped: a group has fewer than 2 valid values",
            style("•").dim()
        ),
    }

    match &inference.window_z_test {
        Some(test) => {
            let verdict = if test.p_value < ALPHA {
                style("event rate shifts across the window").green().bold()
            } else {
                style("event rate stable across the window").yellow()
            };
            println!(
                "    {} Two-proportion z-test (first vs second half): z = {:.3}, p = {} → {}",
                style("•").dim(),
                test.statistic,
                fmt_num(test.p_value),
                verdict
            );
        }
        None => println!(
            "    {} Two-proportion z-test skipped: degenerate pooled proportion",
            style("•").dim()
        ),
    }
}

/// Closing summary of the analysis run
#[derive(Debug, Default)]
pub struct EdaSummary {
    pub rows: usize,
    pub columns: usize,
    pub event_rate: Option<f64>,
    pub top_feature: Option<(String, f64)>,
    pub mean_difference_significant: Option<bool>,
}

impl EdaSummary {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("ANALYSIS SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("Rows"), Cell::new(self.rows)]);
        table.add_row(vec![Cell::new("Columns"), Cell::new(self.columns)]);

        if let Some(rate) = self.event_rate {
            table.add_row(vec![
                Cell::new("Event rate"),
                Cell::new(format!("{:.4}%", rate * 100.0)).fg(Color::Yellow),
            ]);
        }

        if let Some((feature, r)) = &self.top_feature {
            table.add_row(vec![
                Cell::new("Strongest feature"),
                Cell::new(format!("{} (r = {:+.3})", feature, r)).fg(Color::Green),
            ]);
        }

        if let Some(significant) = self.mean_difference_significant {
            table.add_row(vec![
                Cell::new("Mean amounts differ"),
                if significant {
                    Cell::new("yes").fg(Color::Green).add_attribute(Attribute::Bold)
                } else {
                    Cell::new("no").fg(Color::Yellow)
                },
            ]);
        }

        print_table(&table);
    }
}

/// Indent a table to match the rest of the run output
fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => fmt_num(v),
        None => "-".to_string(),
    }
}

fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1000.0 {
        format!("{:.1}", v)
    } else if v.abs() >= 0.001 {
        format!("{:.4}", v)
    } else {
        format!("{:.2e}", v)
    }
}
