//! Error types for the feature preparation pipeline.
//!
//! Pipeline functions return `anyhow::Result`; the failures a caller may want
//! to match on are raised as a `PipelineError` and can be recovered with
//! `err.downcast_ref::<PipelineError>()`.

use thiserror::Error;

/// Domain errors raised by the preparation stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// One or more required columns are absent from the input.
    #[error("Required column(s) missing from input: {}", .missing.join(", "))]
    Schema {
        /// Every required column that was not found, in configured order
        missing: Vec<String>,
    },

    /// A positive-valued column holds values for which log10 is undefined.
    #[error(
        "Column '{column}' contains {count} non-positive value(s) (first at row {first_row}); \
         log10 is undefined"
    )]
    NonPositive {
        column: String,
        count: usize,
        /// Zero-based row index of the first offending value
        first_row: usize,
    },

    /// A column that flows into the outputs still has nulls after imputation.
    #[error("Column '{column}' contains {count} missing value(s) and has no imputation rule")]
    UnexpectedMissing { column: String, count: usize },

    /// The encoder met a category it was not fitted on.
    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// The split would leave the training or validation partition empty.
    #[error(
        "Splitting {rows} row(s) with train fraction {train_fraction} leaves an empty partition"
    )]
    EmptyPartition { rows: usize, train_fraction: f64 },

    /// The configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
