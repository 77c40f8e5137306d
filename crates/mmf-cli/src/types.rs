//! Run results shared by the pipeline and the summary printer.

use std::path::PathBuf;

use mmf_model::{FeatureTable, IntegrationSummary, ModalityCatalog};
use mmf_report::ArtifactFailure;

/// Where a modality's rows came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalitySource {
    /// Parsed from a file.
    Loaded { path: PathBuf },
    /// No candidate file existed; rows were synthesized.
    Absent,
    /// A candidate existed but could not be parsed; rows were synthesized.
    Malformed { path: PathBuf, reason: String },
    /// The file parsed but had no usable rows; rows were synthesized.
    Empty { path: PathBuf },
}

impl ModalitySource {
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, ModalitySource::Loaded { .. })
    }

    /// Short label for terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            ModalitySource::Loaded { .. } => "file",
            ModalitySource::Absent => "synthetic (absent)",
            ModalitySource::Malformed { .. } => "synthetic (malformed)",
            ModalitySource::Empty { .. } => "synthetic (empty)",
        }
    }
}

/// Per-modality outcome of a run.
#[derive(Debug, Clone)]
pub struct ModalityOutcome {
    pub name: String,
    pub is_primary: bool,
    pub source: ModalitySource,
    /// Rows before preprocessing.
    pub rows_in: usize,
    /// Rows contributed to the fused table.
    pub rows_out: usize,
    /// Columns contributed to the fused table.
    pub features: usize,
}

/// Result of a complete integration run.
#[derive(Debug)]
pub struct IntegrationResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub modalities: Vec<ModalityOutcome>,
    pub fused: FeatureTable,
    pub summary: IntegrationSummary,
    pub catalogs: Vec<ModalityCatalog>,
    /// Artifacts that were written.
    pub artifacts: Vec<PathBuf>,
    /// Artifacts that could not be written.
    pub artifact_failures: Vec<ArtifactFailure>,
}

impl IntegrationResult {
    /// Secondary modalities that fell back to synthetic data.
    pub fn synthesized(&self) -> impl Iterator<Item = &ModalityOutcome> {
        self.modalities
            .iter()
            .filter(|outcome| outcome.source.is_synthetic())
    }
}
