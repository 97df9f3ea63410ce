//! Pipeline configuration
//!
//! Every column list, path and threshold the pipeline uses lives in
//! `PipelineConfig`. The defaults describe the housing-price dataset; a JSON
//! file can override any subset of fields.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::encoder::EncoderFit;
use super::error::PipelineError;
use super::impute::{FillValue, ImputeRule};
use super::transform::{log_column_name, NonPositivePolicy};

pub const DEFAULT_INPUT_PATH: &str = "/opt/ml/processing/input/house_prices.csv";
pub const DEFAULT_TRAIN_OUTPUT_PATH: &str = "/opt/ml/processing/train/train.csv";
pub const DEFAULT_VALIDATION_OUTPUT_PATH: &str = "/opt/ml/processing/validation/validation.csv";
pub const DEFAULT_TARGET_COLUMN: &str = "LogSalePrice";
pub const DEFAULT_RANDOM_SEED: u64 = 42;
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.75;
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10000;

/// The 16 input columns the pipeline reads
pub const DEFAULT_SELECTED_COLUMNS: [&str; 16] = [
    "SalePrice",
    "MSZoning",
    "LotFrontage",
    "LotArea",
    "GrLivArea",
    "OverallQual",
    "OverallCond",
    "YearBuilt",
    "YearRemodAdd",
    "RoofStyle",
    "FullBath",
    "BedroomAbvGr",
    "TotRmsAbvGrd",
    "Fireplaces",
    "GarageType",
    "HouseStyle",
];

pub const DEFAULT_CATEGORICAL_COLUMNS: [&str; 4] =
    ["MSZoning", "RoofStyle", "GarageType", "HouseStyle"];

/// CSV field values read as missing (the pandas `read_csv` defaults)
pub const DEFAULT_NULL_VALUES: [&str; 19] = [
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

pub const DEFAULT_POSITIVE_VALUED_COLUMNS: [&str; 4] =
    ["SalePrice", "LotFrontage", "LotArea", "GrLivArea"];

/// Full configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Input dataset (CSV with header, or Parquet)
    pub input_path: PathBuf,
    /// Destination of the training partition
    pub train_output_path: PathBuf,
    /// Destination of the validation partition
    pub validation_output_path: PathBuf,
    /// Regression label, written as the first output column
    pub target_column: String,
    /// Columns read from the input, in working-table order
    pub selected_columns: Vec<String>,
    /// Subset of `selected_columns` treated as categories
    pub categorical_columns: Vec<String>,
    /// Subset of `selected_columns` that receive a `Log<name>` column
    pub positive_valued_columns: Vec<String>,
    /// Fixed-value imputation rules, applied in order after the log stage
    pub imputation: Vec<ImputeRule>,
    pub random_seed: u64,
    /// Share of rows assigned to the training partition, in (0, 1)
    pub train_fraction: f64,
    pub non_positive_policy: NonPositivePolicy,
    pub encoder_fit: EncoderFit,
    /// Add the non-target log columns to the numeric features
    pub keep_log_features: bool,
    /// CSV schema inference rows (0 = full scan)
    pub infer_schema_length: usize,
    /// CSV field values treated as missing in every column
    pub null_values: Vec<String>,
    /// Optional JSON manifest describing the written outputs
    pub manifest_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            train_output_path: PathBuf::from(DEFAULT_TRAIN_OUTPUT_PATH),
            validation_output_path: PathBuf::from(DEFAULT_VALIDATION_OUTPUT_PATH),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            selected_columns: to_strings(&DEFAULT_SELECTED_COLUMNS),
            categorical_columns: to_strings(&DEFAULT_CATEGORICAL_COLUMNS),
            positive_valued_columns: to_strings(&DEFAULT_POSITIVE_VALUED_COLUMNS),
            imputation: vec![
                ImputeRule::number("LotFrontage", 0.0),
                ImputeRule::number("LogLotFrontage", 0.0),
                ImputeRule::label("GarageType", "None"),
            ],
            random_seed: DEFAULT_RANDOM_SEED,
            train_fraction: DEFAULT_TRAIN_FRACTION,
            non_positive_policy: NonPositivePolicy::default(),
            encoder_fit: EncoderFit::default(),
            keep_log_features: false,
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            null_values: to_strings(&DEFAULT_NULL_VALUES),
            manifest_path: None,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PipelineConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Pretty-printed JSON form of this configuration
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Selected columns that are not categorical, in selection order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.selected_columns
            .iter()
            .filter(|c| !self.categorical_columns.contains(c))
            .cloned()
            .collect()
    }

    /// Names of the derived log columns, in positive-valued order
    pub fn log_columns(&self) -> Vec<String> {
        self.positive_valued_columns
            .iter()
            .map(|c| log_column_name(c))
            .collect()
    }

    /// Numeric columns that become features.
    ///
    /// Numeric originals minus the positive-valued ones (superseded by their
    /// logs), followed by the log columns when `keep_log_features` is set.
    /// The target is never included.
    pub fn numeric_feature_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self
            .numeric_columns()
            .into_iter()
            .filter(|c| !self.positive_valued_columns.contains(c))
            .collect();

        if self.keep_log_features {
            columns.extend(self.log_columns());
        }

        columns.retain(|c| *c != self.target_column);
        columns
    }

    /// Check internal consistency before any data is touched
    pub fn validate(&self) -> Result<()> {
        if self.selected_columns.is_empty() {
            return invalid("selected_columns must not be empty".to_string());
        }

        let mut seen = HashSet::new();
        for column in &self.selected_columns {
            if !seen.insert(column.as_str()) {
                return invalid(format!("selected column '{}' is listed twice", column));
            }
        }

        for column in &self.categorical_columns {
            if !seen.contains(column.as_str()) {
                return invalid(format!(
                    "categorical column '{}' is not in selected_columns",
                    column
                ));
            }
        }

        for column in &self.positive_valued_columns {
            if !seen.contains(column.as_str()) {
                return invalid(format!(
                    "positive-valued column '{}' is not in selected_columns",
                    column
                ));
            }
            if self.categorical_columns.contains(column) {
                return invalid(format!(
                    "positive-valued column '{}' is also categorical",
                    column
                ));
            }
            let log_name = log_column_name(column);
            if seen.contains(log_name.as_str()) {
                return invalid(format!(
                    "derived column '{}' collides with a selected column",
                    log_name
                ));
            }
        }

        let log_columns = self.log_columns();
        let numeric = self.numeric_columns();
        if !log_columns.contains(&self.target_column) && !numeric.contains(&self.target_column) {
            return invalid(format!(
                "target column '{}' must be a numeric selected column or a derived log column",
                self.target_column
            ));
        }

        for rule in &self.imputation {
            let is_categorical = self.categorical_columns.contains(&rule.column);
            let is_numeric = numeric.contains(&rule.column) || log_columns.contains(&rule.column);
            match (&rule.fill, is_categorical, is_numeric) {
                (_, false, false) => {
                    return invalid(format!(
                        "imputation column '{}' is neither selected nor derived",
                        rule.column
                    ));
                }
                (FillValue::Label(_), false, true) => {
                    return invalid(format!(
                        "numeric column '{}' cannot be imputed with a label",
                        rule.column
                    ));
                }
                (FillValue::Number(_), true, _) => {
                    return invalid(format!(
                        "categorical column '{}' cannot be imputed with a number",
                        rule.column
                    ));
                }
                _ => {}
            }
        }

        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return invalid(format!(
                "train_fraction must be strictly between 0 and 1, got {}",
                self.train_fraction
            ));
        }

        if self.train_output_path == self.validation_output_path {
            return invalid("train and validation outputs must be different files".to_string());
        }

        Ok(())
    }
}

fn invalid(message: String) -> Result<()> {
    Err(PipelineError::InvalidConfig(message).into())
}
