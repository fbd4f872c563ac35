//! Terminal styling utilities for the analysis run output

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✧ ", "* ");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗██████╗  █████╗ ██╗   ██╗██████╗ ██╗     ███████╗███╗   ██╗███████╗
    ██╔════╝██╔══██╗██╔══██╗██║   ██║██╔══██╗██║     ██╔════╝████╗  ██║██╔════╝
    █████╗  ██████╔╝███████║██║   ██║██║  ██║██║     █████╗  ██╔██╗ ██║███████╗
    ██╔══╝  ██╔══██╗██╔══██║██║   ██║██║  ██║██║     ██╔══╝  ██║╚██╗██║╚════██║
    ██║     ██║  ██║██║  ██║╚██████╔╝██████╔╝███████╗███████╗██║ ╚████║███████║
    ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝ ╚═════╝ ╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("σ").magenta().bold(),
        style("Descriptive and inferential statistics for transaction data").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    input: &Path,
    target: &str,
    amount_column: &str,
    confidence: f64,
    ci_method: &str,
    top_k: usize,
) {
    println!("    {}", style("⚙ Configuration").cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      {}Input:      {}", FOLDER, truncate_path(input, 40));
    println!("      {}Target:     {}", TARGET, target);
    println!("      {}Amount:     {}", CHART, amount_column);
    println!(
        "      Confidence: {:.0}%  (proportion CI: {})",
        confidence * 100.0,
        ci_method
    );
    println!("      Top-k:      {}", top_k);
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a numbered step header
pub fn print_step_header(step: usize, title: &str) {
    println!();
    println!(
        "    {} {}",
        style(format!("[{}]", step)).cyan().bold(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success line
pub fn print_success(message: &str) {
    println!("    {} {}", style("✔").green().bold(), message);
}

/// Print an informational line
pub fn print_info(message: &str) {
    println!("    {} {}", style("ℹ").blue(), message);
}

/// Print a warning line
pub fn print_warning(message: &str) {
    println!("    {} {}", style("⚠").yellow().bold(), message);
}

/// Print a labelled count, with an optional qualifier
pub fn print_count(label: &str, count: usize, qualifier: Option<&str>) {
    match qualifier {
        Some(extra) => println!(
            "    {} {} {} {}",
            style("•").dim(),
            style(count).yellow().bold(),
            label,
            style(extra).dim()
        ),
        None => println!(
            "    {} {} {}",
            style("•").dim(),
            style(count).yellow().bold(),
            label
        ),
    }
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("⏱ {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the closing line with the total run time
pub fn print_completion(elapsed: Duration) {
    println!();
    println!("    {}", style("━".repeat(50)).dim());
    println!(
        "    {} {} {}",
        style("✔").green().bold(),
        style("Analysis complete in").white(),
        style(format!("{:.2}s", elapsed.as_secs_f64())).green().bold()
    );
    println!();
}

/// Truncate a path for display, keeping the tail
fn truncate_path(path: &Path, max_len: usize) -> String {
    let display = path.display().to_string();
    if display.len() <= max_len {
        return display;
    }
    let tail: String = display
        .chars()
        .rev()
        .take(max_len.saturating_sub(1))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("…{}", tail)
}
