//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::PipelineConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static SPLIT: Emoji<'_, '_> = Emoji("✂️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ██╗  ██╗ █████╗ ██╗   ██╗███████╗██████╗ ██████╗ ███████╗██████╗
    ██║  ██║██╔══██╗██║   ██║██╔════╝██╔══██╗██╔══██╗██╔════╝██╔══██╗
    ███████║███████║██║   ██║███████╗██████╔╝██████╔╝█████╗  ██████╔╝
    ██╔══██║██╔══██║██║   ██║╚════██║██╔═══╝ ██╔══██╗██╔══╝  ██╔═══╝
    ██║  ██║██║  ██║╚██████╔╝███████║██║     ██║  ██║███████╗██║
    ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚═╝     ╚═╝  ╚═╝╚══════╝╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Housing-price feature preparation").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(config: &PipelineConfig) {
    let box_width = 60;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:      {:<39}│",
        FOLDER,
        truncate_path(&config.input_path, 38)
    );
    println!(
        "    │  {} Train:      {:<39}│",
        SAVE,
        truncate_path(&config.train_output_path, 38)
    );
    println!(
        "    │  {} Validation: {:<39}│",
        SAVE,
        truncate_path(&config.validation_output_path, 38)
    );
    println!(
        "    │  {} Target:     {:<39}│",
        TARGET,
        truncate_string(&config.target_column, 38)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Seed:           {:<35}│",
        DICE,
        style(config.random_seed).yellow()
    );
    println!(
        "    │  {} Train fraction: {:<35}│",
        SPLIT,
        style(format!("{:.0}%", config.train_fraction * 100.0)).yellow()
    );
    println!(
        "    │     Encoder fit:    {:<35}│",
        style(config.encoder_fit).yellow()
    );
    println!(
        "    │     Non-positive:   {:<35}│",
        style(config.non_positive_policy).yellow()
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

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Feature preparation complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!(
            "      Found {} {}",
            style(count).yellow().bold(),
            description
        );
    }
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
