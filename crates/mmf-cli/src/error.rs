//! Fatal pipeline errors.

use std::path::PathBuf;

use mmf_ingest::IngestError;
use mmf_transform::{FusionError, TransformError};
use thiserror::Error;

/// Errors that abort an integration run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The primary modality could not be located or parsed.
    #[error("primary modality '{modality}' could not be loaded from {}", expected.display())]
    MissingPrimaryData {
        modality: String,
        expected: PathBuf,
        #[source]
        source: Option<IngestError>,
    },

    /// A secondary modality is absent and has nothing to synthesize from.
    #[error("modality '{modality}' is absent and has no synthetic schema")]
    NoSyntheticSchema { modality: String },

    #[error("modality '{modality}': {source}")]
    Transform {
        modality: String,
        #[source]
        source: TransformError,
    },

    #[error(transparent)]
    Fusion(#[from] FusionError),
}
