//! Error types for table transformations and fusion.

use mmf_model::ModelError;
use thiserror::Error;

/// Errors raised by the preprocessing, normalization, synthesis and
/// alignment stages.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A zero-row table cannot be repeated up to a positive row count.
    #[error("cannot align an empty table to {target} rows")]
    EmptySource { target: usize },

    /// A synthetic label column has nothing to cycle through.
    #[error("synthetic column '{column}' has no labels")]
    EmptyLabelCycle { column: String },

    /// Table construction or column access failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Internal-contract violations detected while concatenating modalities.
#[derive(Debug, Error)]
pub enum FusionError {
    /// Two modalities contribute a column with the same final name.
    #[error("column '{column}' from modality '{second}' collides with modality '{first}'")]
    ColumnCollision {
        column: String,
        first: String,
        second: String,
    },

    /// A modality's table was not aligned to the target row count.
    #[error("modality '{modality}' has {actual} rows, expected {expected}")]
    RowCountMismatch {
        modality: String,
        expected: usize,
        actual: usize,
    },

    /// Assembling the fused table failed.
    #[error("failed to assemble fused table: {0}")]
    Table(#[from] ModelError),
}

/// Result alias for transformation stages.
pub type Result<T> = std::result::Result<T, TransformError>;
