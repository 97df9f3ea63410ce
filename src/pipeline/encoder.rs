//! Categorical encoders: from dictionary-encoded columns to numeric features

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::category::CategoricalColumn;
use super::error::PipelineError;

/// Which rows the categorical encoder learns its categories from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderFit {
    /// Every row, before the split (train and validation share one vocabulary)
    #[default]
    FullDataset,
    /// Training rows only; unseen validation categories are an error
    TrainingOnly,
}

impl std::fmt::Display for EncoderFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncoderFit::FullDataset => write!(f, "all"),
            EncoderFit::TrainingOnly => write!(f, "train"),
        }
    }
}

impl std::str::FromStr for EncoderFit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "full" | "full_dataset" => Ok(EncoderFit::FullDataset),
            "train" | "training" | "training_only" => Ok(EncoderFit::TrainingOnly),
            _ => Err(format!(
                "Unknown encoder fit scope: '{}'. Use 'all' or 'train'.",
                s
            )),
        }
    }
}

/// Turns categorical columns into numeric feature columns.
///
/// `fit` learns the output layout from a subset of rows; `transform` encodes
/// every row of the same columns with that layout.
pub trait CategoricalEncoder {
    /// Learn categories from `rows` (ascending row indices) of each column
    fn fit(&mut self, columns: &[CategoricalColumn], rows: &[usize]) -> Result<()>;

    /// Encode all rows, one output column per feature name
    fn transform(&self, columns: &[CategoricalColumn]) -> Result<Vec<Column>>;

    /// Output column names in the order `transform` produces them
    fn feature_names(&self) -> Vec<String>;
}

/// Fitted categories for one source column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedCategories {
    pub column: String,
    pub categories: Vec<String>,
}

/// One 0/1 indicator column per (source column, category) pair.
///
/// Categories keep the order in which they are first seen among the fit
/// rows; indicator columns are named `<column>_<category>`.
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    fitted: Vec<FittedCategories>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted categories per source column, in source-column order
    pub fn categories(&self) -> &[FittedCategories] {
        &self.fitted
    }

    /// Total number of indicator columns `transform` produces
    pub fn n_features_out(&self) -> usize {
        self.fitted.iter().map(|f| f.categories.len()).sum()
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn fit(&mut self, columns: &[CategoricalColumn], rows: &[usize]) -> Result<()> {
        let mut fitted = Vec::with_capacity(columns.len());

        for column in columns {
            // Walk the fit rows in order and keep each level on first sight
            let mut seen = vec![false; column.levels.len()];
            let mut categories = Vec::new();
            for &row in rows {
                let code = column.codes[row] as usize;
                if !seen[code] {
                    seen[code] = true;
                    categories.push(column.levels[code].clone());
                }
            }
            fitted.push(FittedCategories {
                column: column.name.clone(),
                categories,
            });
        }

        self.fitted = fitted;
        Ok(())
    }

    fn transform(&self, columns: &[CategoricalColumn]) -> Result<Vec<Column>> {
        if columns.len() != self.fitted.len() {
            anyhow::bail!(
                "Encoder was fitted on {} column(s) but asked to transform {}",
                self.fitted.len(),
                columns.len()
            );
        }

        let mut output = Vec::with_capacity(self.n_features_out());

        for (column, fitted) in columns.iter().zip(&self.fitted) {
            if column.name != fitted.column {
                anyhow::bail!(
                    "Encoder expected column '{}' but received '{}'",
                    fitted.column,
                    column.name
                );
            }

            // Map this column's level codes onto fitted category positions
            let positions: Vec<Option<usize>> = column
                .levels
                .iter()
                .map(|level| fitted.categories.iter().position(|c| c == level))
                .collect();

            let mut indicators = vec![vec![0u8; column.len()]; fitted.categories.len()];
            for (row, &code) in column.codes.iter().enumerate() {
                match positions[code as usize] {
                    Some(position) => indicators[position][row] = 1,
                    None => {
                        return Err(PipelineError::UnknownCategory {
                            column: column.name.clone(),
                            value: column.levels[code as usize].clone(),
                        }
                        .into());
                    }
                }
            }

            for (category, values) in fitted.categories.iter().zip(indicators) {
                let name = format!("{}_{}", column.name, category);
                output.push(Column::new(name.into(), values));
            }
        }

        Ok(output)
    }

    fn feature_names(&self) -> Vec<String> {
        self.fitted
            .iter()
            .flat_map(|f| {
                f.categories
                    .iter()
                    .map(move |category| format!("{}_{}", f.column, category))
            })
            .collect()
    }
}
