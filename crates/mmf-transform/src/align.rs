//! Row-count alignment of secondary tables.

use std::cmp::Ordering;

use mmf_model::FeatureTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{Result, TransformError};

/// Row positions that bring a table of `rows` rows to exactly `target` rows.
///
/// Larger tables are subsampled without replacement using a generator seeded
/// with `seed`. Smaller tables are repeated whole and truncated, so the
/// result is `0, 1, .., rows - 1, 0, 1, ..`. Equal sizes keep every row.
pub fn alignment_indices(rows: usize, target: usize, seed: u64) -> Result<Vec<usize>> {
    match rows.cmp(&target) {
        Ordering::Equal => Ok((0..rows).collect()),
        Ordering::Greater => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Ok(rand::seq::index::sample(&mut rng, rows, target).into_vec())
        }
        Ordering::Less if rows == 0 => Err(TransformError::EmptySource { target }),
        Ordering::Less => Ok((0..target).map(|i| i % rows).collect()),
    }
}

/// Resizes `table` to exactly `target` rows.
pub fn align(table: &FeatureTable, target: usize, seed: u64) -> Result<FeatureTable> {
    let rows = table.height();
    if rows == target {
        return Ok(table.clone());
    }

    let indices = alignment_indices(rows, target, seed)?;
    debug!(
        from = rows,
        to = target,
        strategy = if rows > target { "subsample" } else { "repeat" },
        "aligned table"
    );
    Ok(table.take_rows(&indices)?)
}
