//! Logarithmic derivation of positive-valued columns

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// Prefix joined to a source column name to name its log10 column
pub const LOG_PREFIX: &str = "Log";

/// What to do with values for which log10 is undefined (zero, negative, NaN)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonPositivePolicy {
    /// Fail the run before any log column is derived
    #[default]
    Reject,
    /// Keep the non-finite results (-inf for 0, NaN for negatives) and warn
    Passthrough,
}

impl std::fmt::Display for NonPositivePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonPositivePolicy::Reject => write!(f, "reject"),
            NonPositivePolicy::Passthrough => write!(f, "passthrough"),
        }
    }
}

impl std::str::FromStr for NonPositivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(NonPositivePolicy::Reject),
            "passthrough" => Ok(NonPositivePolicy::Passthrough),
            _ => Err(format!(
                "Unknown non-positive policy: '{}'. Use 'reject' or 'passthrough'.",
                s
            )),
        }
    }
}

/// Name of the derived log10 column for `column`
pub fn log_column_name(column: &str) -> String {
    format!("{}{}", LOG_PREFIX, column)
}

/// Append a `Log<name>` column holding log10 of each listed column.
///
/// Nulls in the source stay null in the derived column. Values <= 0 (and NaN)
/// are handled according to `policy`; under `Reject` every listed column is
/// checked before the frame is touched, so a failure leaves `df` unchanged.
pub fn add_log_columns(
    df: &mut DataFrame,
    columns: &[String],
    policy: NonPositivePolicy,
) -> Result<()> {
    let mut derived: Vec<Column> = Vec::with_capacity(columns.len());

    for name in columns {
        let values = float_values(df, name)?;

        let invalid_rows: Vec<usize> = values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| match v {
                Some(x) if x.is_nan() || *x <= 0.0 => Some(row),
                _ => None,
            })
            .collect();

        if !invalid_rows.is_empty() {
            match policy {
                NonPositivePolicy::Reject => {
                    return Err(PipelineError::NonPositive {
                        column: name.clone(),
                        count: invalid_rows.len(),
                        first_row: invalid_rows[0],
                    }
                    .into());
                }
                NonPositivePolicy::Passthrough => {
                    tracing::warn!(
                        column = %name,
                        count = invalid_rows.len(),
                        "log10 of non-positive values yields non-finite results"
                    );
                }
            }
        }

        let logs: Vec<Option<f64>> = values.iter().map(|v| v.map(f64::log10)).collect();
        derived.push(Column::new(log_column_name(name).into(), logs));
    }

    for column in derived {
        df.with_column(column)
            .context("Failed to append log column")?;
    }

    tracing::info!("Derived {} log10 column(s)", columns.len());
    Ok(())
}

/// Read a column as nullable f64 values
fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    if !column.dtype().is_primitive_numeric() {
        anyhow::bail!(
            "Column '{}' must be numeric to take log10, found {}",
            name,
            column.dtype()
        );
    }

    let float_col = column.cast(&DataType::Float64)?;

    Ok(float_col.f64()?.into_iter().collect())
}
