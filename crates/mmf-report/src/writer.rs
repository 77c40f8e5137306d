//! Artifact persistence.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use mmf_model::{FeatureTable, IntegrationSummary, ModalityCatalog};
use polars::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::text::{render_modality_info, render_summary_text};

/// Files produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    FusedTable,
    SummaryText,
    ModalityInfo,
    SummaryJson,
}

impl ArtifactKind {
    /// Every artifact, in write order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::FusedTable,
        ArtifactKind::SummaryText,
        ArtifactKind::ModalityInfo,
        ArtifactKind::SummaryJson,
    ];

    /// File name inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::FusedTable => "integrated_features.csv",
            ArtifactKind::SummaryText => "integration_summary.txt",
            ArtifactKind::ModalityInfo => "modality_info.txt",
            ArtifactKind::SummaryJson => "integration_summary.json",
        }
    }
}

/// An artifact that could not be persisted.
#[derive(Debug)]
pub struct ArtifactFailure {
    pub kind: Option<ArtifactKind>,
    pub error: ReportError,
}

/// What a call to [`write_artifacts`] managed to persist.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<(ArtifactKind, PathBuf)>,
    pub failures: Vec<ArtifactFailure>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    #[serde(flatten)]
    summary: &'a IntegrationSummary,
    modalities: &'a [ModalityCatalog],
}

/// Creates the output directory if needed. Existing directories are fine.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes the fused table as CSV with a header row. Missing values are empty.
pub fn write_fused_csv(path: &Path, table: &FeatureTable) -> Result<()> {
    let mut file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut df = table.frame().clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| ReportError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Writes text to a file, replacing any previous content.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the summary and modality catalogs as pretty-printed JSON.
pub fn write_summary_json(
    path: &Path,
    summary: &IntegrationSummary,
    catalogs: &[ModalityCatalog],
) -> Result<()> {
    let document = SummaryDocument {
        summary,
        modalities: catalogs,
    };
    let json = serde_json::to_string_pretty(&document).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_text(path, &json)
}

/// Persists every artifact into `output_dir`.
///
/// Failures are logged and collected; a failed artifact never prevents the
/// remaining ones from being attempted.
pub fn write_artifacts(
    output_dir: &Path,
    fused: &FeatureTable,
    summary: &IntegrationSummary,
    catalogs: &[ModalityCatalog],
) -> WriteReport {
    let mut report = WriteReport::default();

    if let Err(error) = ensure_output_dir(output_dir) {
        warn!(path = %output_dir.display(), error = %error, "cannot create output directory");
        report.failures.push(ArtifactFailure { kind: None, error });
        return report;
    }

    for kind in ArtifactKind::ALL {
        let path = output_dir.join(kind.file_name());
        let result = match kind {
            ArtifactKind::FusedTable => write_fused_csv(&path, fused),
            ArtifactKind::SummaryText => write_text(&path, &render_summary_text(summary)),
            ArtifactKind::ModalityInfo => write_text(&path, &render_modality_info(catalogs)),
            ArtifactKind::SummaryJson => write_summary_json(&path, summary, catalogs),
        };
        match result {
            Ok(()) => {
                info!(path = %path.display(), "saved artifact");
                report.written.push((kind, path));
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "failed to save artifact");
                report.failures.push(ArtifactFailure {
                    kind: Some(kind),
                    error,
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/output");
        ensure_output_dir(&out).unwrap();
        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("output");
        fs::write(&blocker, "not a directory").unwrap();
        assert!(matches!(
            ensure_output_dir(&blocker),
            Err(ReportError::CreateDir { .. })
        ));
    }

    #[test]
    fn test_fused_csv_leaves_missing_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fused.csv");
        let table = FeatureTable::from_columns(vec![
            Series::new("a".into(), [Some(1.5), None]).into_column(),
            Series::new("b".into(), [Some("x"), Some("y")]).into_column(),
        ])
        .unwrap();

        write_fused_csv(&path, &table).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["a,b", "1.5,x", ",y"]);
    }
}
