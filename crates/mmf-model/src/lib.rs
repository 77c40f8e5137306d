//! Data model for multimodal feature fusion.
//!
//! - [`FeatureTable`]: canonical numeric/categorical table backed by Polars
//! - [`ModalityDescriptor`] and [`ModalityRegistry`]: which sources exist and
//!   how their columns are treated on fusion
//! - [`PipelineContext`]: immutable run configuration
//! - [`IntegrationSummary`]: aggregate statistics of a fused dataset

pub mod context;
pub mod error;
pub mod modality;
pub mod registry;
pub mod summary;
pub mod table;

pub use context::{
    DEFAULT_ALIGNMENT_SEED, DEFAULT_OUTPUT_DIR, IntegrationOptions, PipelineContext,
};
pub use error::{ModelError, Result};
pub use modality::{ModalityDescriptor, SyntheticColumn, SyntheticSchema, display_name};
pub use registry::{IMAGE_FEATURE_COUNT, MFCC_COUNT, ModalityRegistry};
pub use summary::{IntegrationSummary, ModalityCatalog, ModalityFeatureCount};
pub use table::{ColumnKind, FeatureTable, is_numeric_dtype};
