//! Run manifest export
//!
//! The CSV partitions carry no header, so the manifest is the record of what
//! each output column holds and how the split was produced.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{FittedCategories, PipelineConfig, PipelineOutcome};

/// Metadata about the preparation run
#[derive(Serialize)]
pub struct ManifestMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub hausprep_version: String,
    pub input_file: String,
    pub target_column: String,
    pub random_seed: u64,
    pub train_fraction: f64,
    /// "all" or "train"
    pub encoder_fit: String,
    /// "reject" or "passthrough"
    pub non_positive_policy: String,
}

/// Location and size of one written partition
#[derive(Serialize)]
pub struct PartitionEntry {
    pub path: String,
    pub rows: usize,
}

/// Complete manifest document
#[derive(Serialize)]
pub struct RunManifest {
    pub metadata: ManifestMetadata,
    /// Output column order; index 0 is the target
    pub columns: Vec<String>,
    pub categories: Vec<FittedCategories>,
    pub train: PartitionEntry,
    pub validation: PartitionEntry,
}

impl RunManifest {
    pub fn new(outcome: &PipelineOutcome, config: &PipelineConfig) -> Self {
        Self {
            metadata: ManifestMetadata {
                timestamp: Utc::now().to_rfc3339(),
                hausprep_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: config.input_path.display().to_string(),
                target_column: config.target_column.clone(),
                random_seed: config.random_seed,
                train_fraction: config.train_fraction,
                encoder_fit: config.encoder_fit.to_string(),
                non_positive_policy: config.non_positive_policy.to_string(),
            },
            columns: outcome.output_columns.clone(),
            categories: outcome.categories.clone(),
            train: PartitionEntry {
                path: config.train_output_path.display().to_string(),
                rows: outcome.train_rows,
            },
            validation: PartitionEntry {
                path: config.validation_output_path.display().to_string(),
                rows: outcome.validation_rows,
            },
        }
    }
}

/// Write the run manifest as pretty JSON
pub fn export_manifest(
    outcome: &PipelineOutcome,
    config: &PipelineConfig,
    output_path: &Path,
) -> Result<()> {
    let manifest = RunManifest::new(outcome, config);
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create manifest directory: {}", parent.display())
            })?;
        }
    }

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write manifest: {}", output_path.display()))?;

    tracing::info!("Wrote run manifest to {}", output_path.display());
    Ok(())
}
