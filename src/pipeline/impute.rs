//! Fixed-value imputation and the missing-value guard

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// Replacement value for nulls in a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    /// Numeric fill, cast back to the column's numeric dtype
    Number(f64),
    /// Category label for string columns
    Label(String),
}

impl std::fmt::Display for FillValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillValue::Number(n) => write!(f, "{}", n),
            FillValue::Label(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Replace every null in `column` with `fill`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputeRule {
    pub column: String,
    pub fill: FillValue,
}

impl ImputeRule {
    pub fn number(column: &str, fill: f64) -> Self {
        Self {
            column: column.to_string(),
            fill: FillValue::Number(fill),
        }
    }

    pub fn label(column: &str, fill: &str) -> Self {
        Self {
            column: column.to_string(),
            fill: FillValue::Label(fill.to_string()),
        }
    }
}

/// Apply each rule independently, in order.
///
/// Returns `(column, filled_count)` for every rule so callers can report how
/// many values were imputed.
pub fn apply_imputation(df: &mut DataFrame, rules: &[ImputeRule]) -> Result<Vec<(String, usize)>> {
    let mut filled_counts = Vec::with_capacity(rules.len());

    for rule in rules {
        let column = df
            .column(&rule.column)
            .with_context(|| format!("Imputation column '{}' not found", rule.column))?;
        let null_count = column.null_count();

        if null_count > 0 {
            let filled = fill_column(column, &rule.fill)?;
            df.with_column(filled)
                .with_context(|| format!("Failed to replace column '{}'", rule.column))?;
        }

        tracing::info!(
            column = %rule.column,
            filled = null_count,
            "Imputed missing values with {}",
            rule.fill
        );
        filled_counts.push((rule.column.clone(), null_count));
    }

    Ok(filled_counts)
}

fn fill_column(column: &Column, fill: &FillValue) -> Result<Column> {
    let name = column.name().clone();

    match fill {
        FillValue::Number(value) => {
            let dtype = column.dtype().clone();
            if !dtype.is_primitive_numeric() {
                anyhow::bail!(PipelineError::InvalidConfig(format!(
                    "Numeric fill {} cannot be applied to non-numeric column '{}' ({})",
                    value, name, dtype
                )));
            }
            let values: Vec<f64> = column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(*value))
                .collect();
            let filled = Column::new(name.clone(), values)
                .cast(&dtype)
                .with_context(|| format!("Failed to cast imputed column '{}' back to {}", name, dtype))?;
            Ok(filled)
        }
        FillValue::Label(label) => {
            if !matches!(column.dtype(), DataType::String | DataType::Null) {
                anyhow::bail!(PipelineError::InvalidConfig(format!(
                    "Label fill \"{}\" cannot be applied to non-string column '{}' ({})",
                    label,
                    name,
                    column.dtype()
                )));
            }
            let values: Vec<String> = column
                .cast(&DataType::String)?
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or(label.as_str()).to_string())
                .collect();
            Ok(Column::new(name, values))
        }
    }
}

/// Fail with `UnexpectedMissing` on the first listed column that contains nulls
pub fn ensure_no_missing(df: &DataFrame, columns: &[String]) -> Result<()> {
    for name in columns {
        let column = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?;
        let count = column.null_count();
        if count > 0 {
            return Err(PipelineError::UnexpectedMissing {
                column: name.clone(),
                count,
            }
            .into());
        }
    }
    Ok(())
}
