//! Headerless CSV serialization of the output partitions

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tempfile::NamedTempFile;

/// Write `df` as CSV without header into a temp file beside `path`.
///
/// The returned file is not yet visible at `path`; call `persist` on it.
fn write_staged(df: &mut DataFrame, path: &Path) -> Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;

    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;

    CsvWriter::new(staged.as_file_mut())
        .include_header(false)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(staged)
}

/// Write the two partitions as headerless CSV.
///
/// Both files are fully written to temporary files first and only then
/// renamed into place. If the validation rename fails, the training file just
/// moved into place is removed again, so a failed run never leaves a new
/// training partition beside a stale validation partition.
pub fn write_partitions(
    train: &mut DataFrame,
    train_path: &Path,
    validation: &mut DataFrame,
    validation_path: &Path,
) -> Result<()> {
    let staged_train = write_staged(train, train_path)?;
    let staged_validation = write_staged(validation, validation_path)?;

    staged_train
        .persist(train_path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move output into place: {}", train_path.display()))?;

    if let Err(e) = staged_validation.persist(validation_path) {
        if let Err(cleanup) = std::fs::remove_file(train_path) {
            tracing::warn!(
                "Could not remove {} after failed write: {}",
                train_path.display(),
                cleanup
            );
        }
        return Err(e.error).with_context(|| {
            format!(
                "Failed to move output into place: {}",
                validation_path.display()
            )
        });
    }

    tracing::info!(
        "Wrote {} training rows and {} validation rows",
        train.height(),
        validation.height()
    );
    Ok(())
}
