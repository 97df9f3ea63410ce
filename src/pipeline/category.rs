//! Dictionary-encoded categorical columns

use std::collections::HashMap;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::PipelineError;

/// A categorical column held as level codes.
///
/// `levels` lists each distinct label in order of first appearance and
/// `codes[row]` indexes into it. Encoders consume this form, so selection and
/// imputation never depend on how categories are finally expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalColumn {
    pub name: String,
    pub levels: Vec<String>,
    pub codes: Vec<u32>,
}

impl CategoricalColumn {
    /// Build from a DataFrame column. Nulls are rejected: impute first.
    pub fn from_column(column: &Column) -> Result<Self> {
        let name = column.name().to_string();

        let null_count = column.null_count();
        if null_count > 0 {
            return Err(PipelineError::UnexpectedMissing {
                column: name,
                count: null_count,
            }
            .into());
        }

        let strings = column
            .cast(&DataType::String)
            .with_context(|| format!("Column '{}' cannot be read as categories", name))?;

        let mut levels: Vec<String> = Vec::new();
        let mut lookup: HashMap<String, u32> = HashMap::new();
        let mut codes: Vec<u32> = Vec::with_capacity(column.len());

        for value in strings.str()?.into_no_null_iter() {
            let code = match lookup.get(value) {
                Some(&code) => code,
                None => {
                    let code = levels.len() as u32;
                    levels.push(value.to_string());
                    lookup.insert(value.to_string(), code);
                    code
                }
            };
            codes.push(code);
        }

        Ok(Self {
            name,
            levels,
            codes,
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Label held at `row`
    pub fn label(&self, row: usize) -> &str {
        &self.levels[self.codes[row] as usize]
    }
}

/// Read each named column of `df` as a `CategoricalColumn`
pub fn categorical_columns(df: &DataFrame, names: &[String]) -> Result<Vec<CategoricalColumn>> {
    names
        .iter()
        .map(|name| {
            let column = df
                .column(name)
                .with_context(|| format!("Categorical column '{}' not found", name))?;
            CategoricalColumn::from_column(column)
        })
        .collect()
}
