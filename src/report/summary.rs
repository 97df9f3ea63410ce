//! Preparation summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PipelineOutcome;

/// Summary of one preparation run, shown at the end of the CLI output
#[derive(Debug, Default)]
pub struct PreparationSummary {
    pub input_rows: usize,
    pub input_columns: usize,
    pub feature_columns: usize,
    pub categorical_levels: Vec<(String, usize)>,
    pub imputed: Vec<(String, usize)>,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub load_time: Option<Duration>,
    pub prepare_time: Option<Duration>,
    pub save_time: Option<Duration>,
}

impl PreparationSummary {
    pub fn from_outcome(outcome: &PipelineOutcome) -> Self {
        Self {
            input_rows: outcome.input_rows,
            input_columns: outcome.input_columns,
            // target is the first output column
            feature_columns: outcome.output_columns.len().saturating_sub(1),
            categorical_levels: outcome
                .categories
                .iter()
                .map(|c| (c.column.clone(), c.categories.len()))
                .collect(),
            imputed: outcome.imputed.clone(),
            train_rows: outcome.train_rows,
            validation_rows: outcome.validation_rows,
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_prepare_time(&mut self, elapsed: Duration) {
        self.prepare_time = Some(elapsed);
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = Some(elapsed);
    }

    pub fn total_time(&self) -> Duration {
        [self.load_time, self.prepare_time, self.save_time]
            .iter()
            .flatten()
            .sum()
    }

    /// Share of rows in the training partition, as a percentage
    pub fn train_pct(&self) -> f64 {
        let total = self.train_rows + self.validation_rows;
        if total == 0 {
            0.0
        } else {
            self.train_rows as f64 / total as f64 * 100.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Input Shape"),
            Cell::new(format!("{} × {}", self.input_rows, self.input_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🧮 Feature Columns"),
            Cell::new(self.feature_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        let imputed_total: usize = self.imputed.iter().map(|(_, n)| n).sum();
        table.add_row(vec![
            Cell::new("🩹 Imputed Values"),
            Cell::new(imputed_total).fg(if imputed_total == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("🏋️  Training Rows"),
            Cell::new(format!("{} ({:.1}%)", self.train_rows, self.train_pct())).fg(Color::Cyan),
        ]);
        table.add_row(vec![
            Cell::new("🔍 Validation Rows"),
            Cell::new(self.validation_rows).fg(Color::Cyan),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.categorical_levels.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("🏷️").cyan(),
                style("ONE-HOT ENCODED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for (column, levels) in &self.categorical_levels {
                println!(
                    "        {} {} {}",
                    style("•").dim(),
                    column,
                    style(format!("({} categories)", levels)).dim()
                );
            }
        }
    }
}
