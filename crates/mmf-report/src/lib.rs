//! Integration reporting.
//!
//! Computes the [`mmf_model::IntegrationSummary`] of a fused table and
//! persists the run artifacts:
//!
//! - `integrated_features.csv`: the fused table
//! - `integration_summary.txt`: totals and per-modality feature breakdown
//! - `modality_info.txt`: contributed column names per modality
//! - `integration_summary.json`: the summary in machine-readable form

mod error;
mod summary;
mod text;
mod writer;

pub use error::{ReportError, Result};
pub use summary::{catalog, summarize};
pub use text::{INTEGRATION_METHOD, render_modality_info, render_summary_text};
pub use writer::{
    ArtifactFailure, ArtifactKind, WriteReport, ensure_output_dir, write_artifacts,
    write_fused_csv, write_summary_json, write_text,
};
