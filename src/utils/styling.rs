//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::QuantileBounds;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static HEART: Emoji<'_, '_> = Emoji("🫀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FIRE: Emoji<'_, '_> = Emoji("🔥 ", "");
pub static RULER: Emoji<'_, '_> = Emoji("📏 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("medviz").cyan().bold(),
        style("medical examination visualizer").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, catplot: &Path, heatmap: &Path, bounds: &QuantileBounds) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:   {:<38}│", FOLDER, truncate_path(input, 37));
    println!("    │  {} Catplot: {:<38}│", CHART, truncate_path(catplot, 37));
    println!("    │  {} Heatmap: {:<38}│", FIRE, truncate_path(heatmap, 37));
    println!("    ├{}┤", line);
    println!(
        "    │  {} Height/weight percentiles: {:<20}│",
        RULER,
        style(format!(
            "{:.1}%-{:.1}%",
            bounds.lower * 100.0,
            bounds.upper * 100.0
        ))
        .yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("({})", crate::report::format_duration(elapsed))).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        HEART,
        style("medviz run complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
