//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Build a lazy scan over a CSV or Parquet file (chosen by extension)
///
/// `infer_schema_length` and `null_values` apply to CSV only; an
/// `infer_schema_length` of 0 means scan the whole file. Fields equal to any of
/// `null_values` are read as missing in every column.
pub fn scan_dataset(
    path: &Path,
    infer_schema_length: usize,
    null_values: &[String],
) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let null_values = if null_values.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(
            null_values.iter().map(|v| v.as_str().into()).collect(),
        ))
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(schema_length)
            .with_null_values(null_values)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load a dataset fully into memory.
///
/// Returns the DataFrame together with its row count, column count and
/// estimated size in MB.
pub fn load_dataset(
    path: &Path,
    infer_schema_length: usize,
    null_values: &[String],
) -> Result<(DataFrame, usize, usize, f64)> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let df = scan_dataset(path, infer_schema_length, null_values)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    tracing::info!("Initial shape: ({}, {})", rows, cols);
    Ok((df, rows, cols, memory_mb))
}

/// Column names of a dataset, read from its schema without loading rows
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_dataset(path, 100, &[])?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    Ok(schema.iter_names().map(|s| s.to_string()).collect())
}
