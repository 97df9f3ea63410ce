//! Pipeline runner - composes the preparation stages into one batch job

use anyhow::{Context, Result};
use polars::prelude::*;

use super::category::categorical_columns;
use super::config::PipelineConfig;
use super::encoder::{CategoricalEncoder, EncoderFit, FittedCategories, OneHotEncoder};
use super::error::PipelineError;
use super::impute::{apply_imputation, ensure_no_missing};
use super::loader::load_dataset;
use super::select::select_columns;
use super::split::{train_validation_split, SplitIndices};
use super::transform::add_log_columns;
use super::writer::write_partitions;

/// Everything produced before serialization
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Selected, log-augmented and imputed columns, one row per input row
    pub working: DataFrame,
    /// Numeric features followed by the one-hot indicators
    pub features: DataFrame,
    /// Regression label, row-aligned with `features`
    pub target: Column,
    pub split: SplitIndices,
    pub encoder: OneHotEncoder,
    /// `(column, filled_count)` for each imputation rule
    pub imputed: Vec<(String, usize)>,
}

impl PreparedData {
    /// Output column names: target first, then features
    pub fn output_columns(&self) -> Vec<String> {
        std::iter::once(self.target.name().to_string())
            .chain(
                self.features
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string()),
            )
            .collect()
    }

    /// Target plus features, taken by the split indices.
    ///
    /// Returns `(train, validation)`, each with the target as first column.
    pub fn partitions(&self) -> Result<(DataFrame, DataFrame)> {
        let mut columns = Vec::with_capacity(self.features.width() + 1);
        columns.push(self.target.clone());
        columns.extend(self.features.get_columns().iter().cloned());
        let labelled = DataFrame::new(columns).context("Failed to join target and features")?;

        let train = labelled
            .take(&self.split.train_idx())
            .context("Failed to take training rows")?;
        let validation = labelled
            .take(&self.split.validation_idx())
            .context("Failed to take validation rows")?;
        Ok((train, validation))
    }
}

/// Run every in-memory stage on a loaded table: select, log-transform,
/// impute, split, encode, recombine and extract the target.
pub fn prepare_features(raw: &DataFrame, config: &PipelineConfig) -> Result<PreparedData> {
    config.validate()?;

    let mut working = select_columns(raw, &config.selected_columns)?;

    tracing::info!("Transforming positive columns to log");
    add_log_columns(
        &mut working,
        &config.positive_valued_columns,
        config.non_positive_policy,
    )?;

    tracing::info!("Imputing missing data");
    let imputed = apply_imputation(&mut working, &config.imputation)?;

    let numeric_features = config.numeric_feature_columns();
    let mut required = numeric_features.clone();
    required.push(config.target_column.clone());
    required.extend(config.categorical_columns.iter().cloned());
    ensure_no_missing(&working, &required)?;

    // Depends only on row count and seed; the encoder may fit on train rows only
    let split = train_validation_split(working.height(), config.train_fraction, config.random_seed)?;

    tracing::info!("Encoding categorical variables");
    let categories = categorical_columns(&working, &config.categorical_columns)?;
    let fit_rows: Vec<usize> = match config.encoder_fit {
        EncoderFit::FullDataset => (0..working.height()).collect(),
        EncoderFit::TrainingOnly => split.train_sorted(),
    };
    let mut encoder = OneHotEncoder::new();
    encoder.fit(&categories, &fit_rows)?;
    check_feature_names(&encoder.feature_names(), &numeric_features, &config.target_column)?;
    let encoded = encoder.transform(&categories)?;
    tracing::info!(
        "Categorical data shape: ({}, {})",
        working.height(),
        encoded.len()
    );

    let features = working
        .select(numeric_features.iter().map(|c| c.as_str()))
        .context("Failed to select numeric feature columns")?
        .hstack(&encoded)
        .context("Failed to append encoded columns")?;
    tracing::info!("Final data shape: ({}, {})", features.height(), features.width());

    let target = working
        .column(&config.target_column)
        .with_context(|| format!("Target column '{}' not found", config.target_column))?
        .clone();

    Ok(PreparedData {
        working,
        features,
        target,
        split,
        encoder,
        imputed,
    })
}

/// Fail when an indicator name equals a numeric feature or the target.
///
/// Indicator names depend on the data, so this cannot be part of
/// `PipelineConfig::validate`.
fn check_feature_names(indicators: &[String], numeric: &[String], target: &str) -> Result<()> {
    for name in indicators {
        if numeric.contains(name) || name == target {
            return Err(PipelineError::InvalidConfig(format!(
                "one-hot column '{}' collides with an existing output column",
                name
            ))
            .into());
        }
    }
    Ok(())
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub input_rows: usize,
    pub input_columns: usize,
    /// Output layout: target first, then features
    pub output_columns: Vec<String>,
    pub categories: Vec<FittedCategories>,
    pub imputed: Vec<(String, usize)>,
    pub train_rows: usize,
    pub validation_rows: usize,
}

impl PipelineOutcome {
    pub fn from_prepared(prepared: &PreparedData, input_rows: usize, input_columns: usize) -> Self {
        Self {
            input_rows,
            input_columns,
            output_columns: prepared.output_columns(),
            categories: prepared.encoder.categories().to_vec(),
            imputed: prepared.imputed.clone(),
            train_rows: prepared.split.train.len(),
            validation_rows: prepared.split.validation.len(),
        }
    }
}

/// Split `prepared` and write both partitions to the configured outputs
pub fn write_prepared(prepared: &PreparedData, config: &PipelineConfig) -> Result<()> {
    let (mut train, mut validation) = prepared.partitions()?;
    write_partitions(
        &mut train,
        &config.train_output_path,
        &mut validation,
        &config.validation_output_path,
    )
}

/// Load the input, prepare features and write both partitions.
///
/// Also writes the run manifest when `config.manifest_path` is set. Any
/// failure aborts the run before an output file is moved into place.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome> {
    config.validate()?;

    let (raw, rows, cols, _memory_mb) = load_dataset(
        &config.input_path,
        config.infer_schema_length,
        &config.null_values,
    )?;
    let prepared = prepare_features(&raw, config)?;
    write_prepared(&prepared, config)?;

    let outcome = PipelineOutcome::from_prepared(&prepared, rows, cols);
    if let Some(path) = &config.manifest_path {
        crate::report::export_manifest(&outcome, config, path)?;
    }

    Ok(outcome)
}
