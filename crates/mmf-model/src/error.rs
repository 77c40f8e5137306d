//! Error types for the fusion data model.

use thiserror::Error;

/// Errors raised while building tables or validating modality registries.
#[derive(Debug, Error)]
pub enum ModelError {
    // === Registry Errors ===
    /// No modality is marked as primary.
    #[error("no primary modality declared")]
    NoPrimaryModality,

    /// More than one modality is marked as primary.
    #[error("multiple primary modalities declared: '{first}' and '{second}'")]
    MultiplePrimaryModalities { first: String, second: String },

    /// Two modalities share a name.
    #[error("duplicate modality name '{name}'")]
    DuplicateModality { name: String },

    /// A secondary modality has no namespace prefix.
    #[error("secondary modality '{name}' has no namespace prefix")]
    MissingPrefix { name: String },

    /// Two secondary modalities share a namespace prefix.
    #[error("namespace prefix '{prefix}' is used by more than one modality")]
    DuplicatePrefix { prefix: String },

    /// A synthetic label column has an empty label cycle.
    #[error("synthetic column '{column}' of modality '{modality}' has no labels")]
    EmptyLabelCycle { modality: String, column: String },

    // === Table Errors ===
    /// Column not found in the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A numeric accessor was used on a categorical column (or vice versa).
    #[error("column '{column}' is not {expected}")]
    ColumnKind {
        column: String,
        expected: &'static str,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ModelError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::MultiplePrimaryModalities {
            first: "tabular".to_string(),
            second: "image".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "multiple primary modalities declared: 'tabular' and 'image'"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("x".into());
        let model_err: ModelError = polars_err.into();
        assert!(matches!(model_err, ModelError::DataFrame { .. }));
    }
}
