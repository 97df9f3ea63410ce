//! Seeded train/validation split

use anyhow::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::PipelineError;

/// Row indices of each partition.
///
/// Both vectors index the same table; together they cover every row exactly
/// once. Order within a partition is the shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

impl SplitIndices {
    /// Training rows in ascending order
    pub fn train_sorted(&self) -> Vec<usize> {
        let mut rows = self.train.clone();
        rows.sort_unstable();
        rows
    }

    /// Training rows as a polars index array for `DataFrame::take`
    pub fn train_idx(&self) -> IdxCa {
        to_idx("train", &self.train)
    }

    /// Validation rows as a polars index array for `DataFrame::take`
    pub fn validation_idx(&self) -> IdxCa {
        to_idx("validation", &self.validation)
    }
}

fn to_idx(name: &str, rows: &[usize]) -> IdxCa {
    IdxCa::from_vec(name.into(), rows.iter().map(|&r| r as IdxSize).collect())
}

/// Shuffle `0..n_rows` with a seeded RNG and cut it into two partitions.
///
/// `floor(train_fraction * n_rows)` rows go to training; the first
/// `n_rows - n_train` shuffled indices form the validation partition and the
/// rest form the training partition. The same `(n_rows, train_fraction,
/// seed)` always yields the same split.
pub fn train_validation_split(
    n_rows: usize,
    train_fraction: f64,
    seed: u64,
) -> Result<SplitIndices> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(PipelineError::InvalidConfig(format!(
            "train_fraction must be strictly between 0 and 1, got {}",
            train_fraction
        ))
        .into());
    }

    let n_train = (train_fraction * n_rows as f64).floor() as usize;
    let n_validation = n_rows - n_train;

    if n_train == 0 || n_validation == 0 {
        return Err(PipelineError::EmptyPartition {
            rows: n_rows,
            train_fraction,
        }
        .into());
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_validation);
    tracing::info!(
        "Split {} rows into {} training and {} validation rows (seed {})",
        n_rows,
        train.len(),
        indices.len(),
        seed
    );

    Ok(SplitIndices {
        train,
        validation: indices,
    })
}
