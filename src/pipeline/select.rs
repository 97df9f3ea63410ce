//! Column selection against the required schema

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::PipelineError;

/// Keep exactly `columns`, in the given order.
///
/// Every absent column is reported at once in a `PipelineError::Schema`.
pub fn select_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let missing = missing_columns(df, columns);
    if !missing.is_empty() {
        return Err(PipelineError::Schema { missing }.into());
    }

    let selected = df
        .select(columns.iter().map(|c| c.as_str()))
        .context("Failed to select required columns")?;

    tracing::info!(
        "Shape after select: ({}, {})",
        selected.height(),
        selected.width()
    );
    Ok(selected)
}

/// Required columns not present in `df`, in the order given
pub fn missing_columns(df: &DataFrame, columns: &[String]) -> Vec<String> {
    let schema = df.schema();
    columns
        .iter()
        .filter(|name| !schema.contains(name.as_str()))
        .cloned()
        .collect()
}
