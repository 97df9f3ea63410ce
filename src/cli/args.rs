//! Command-line argument definitions using clap

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{EncoderFit, NonPositivePolicy, PipelineConfig};

/// Hausprep - Prepare housing-price features for regression training
#[derive(Parser, Debug)]
#[command(name = "hausprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Pipeline configuration file (JSON). Fields not present take their defaults;
    /// flags below override values from the file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input file path (CSV with header, or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Training partition output path (headerless CSV)
    #[arg(long)]
    pub train_output: Option<PathBuf>,

    /// Validation partition output path (headerless CSV)
    #[arg(long)]
    pub validation_output: Option<PathBuf>,

    /// Target column name, written as the first output column
    #[arg(short, long)]
    pub target: Option<String>,

    /// Random seed for the train/validation split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of rows assigned to training (strictly between 0 and 1)
    #[arg(long, value_parser = validate_train_fraction)]
    pub train_fraction: Option<f64>,

    /// Handling of zero/negative values in log-transformed columns.
    /// Options: "reject" (fail the run) or "passthrough" (keep non-finite logs)
    #[arg(long)]
    pub non_positive: Option<NonPositivePolicy>,

    /// Rows the categorical encoder is fitted on.
    /// Options: "all" (every row, before splitting) or "train" (training rows only)
    #[arg(long)]
    pub fit_encoder_on: Option<EncoderFit>,

    /// Add the non-target log columns (LogLotFrontage, LogLotArea, ...) to the features
    #[arg(long, default_value = "false")]
    pub log_features: bool,

    /// Write a JSON manifest describing output columns, categories and row counts
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long)]
    pub infer_schema_length: Option<usize>,

    /// Overwrite existing outputs without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Log each pipeline stage to stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default pipeline configuration as JSON
    InitConfig {
        /// Output file path (prints to stdout when omitted)
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Build the run configuration: defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(path) = &self.train_output {
            config.train_output_path = path.clone();
        }
        if let Some(path) = &self.validation_output {
            config.validation_output_path = path.clone();
        }
        if let Some(target) = &self.target {
            config.target_column = target.clone();
        }
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
        if let Some(fraction) = self.train_fraction {
            config.train_fraction = fraction;
        }
        if let Some(policy) = self.non_positive {
            config.non_positive_policy = policy;
        }
        if let Some(fit) = self.fit_encoder_on {
            config.encoder_fit = fit;
        }
        if self.log_features {
            config.keep_log_features = true;
        }
        if let Some(path) = &self.manifest {
            config.manifest_path = Some(path.clone());
        }
        if let Some(length) = self.infer_schema_length {
            config.infer_schema_length = length;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Validator for train_fraction parameter
fn validate_train_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "train_fraction must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}
