//! Ordered-candidate lookup shared by every modality.

use std::path::{Path, PathBuf};

use mmf_model::FeatureTable;
use tracing::{debug, info};

use crate::csv::read_feature_table;
use crate::error::Result;

/// Outcome of loading one modality.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// A candidate existed and parsed.
    Loaded { path: PathBuf, table: FeatureTable },
    /// No candidate exists on disk.
    Absent { searched: Vec<PathBuf> },
}

impl LoadOutcome {
    /// The loaded table, if any.
    pub fn table(&self) -> Option<&FeatureTable> {
        match self {
            LoadOutcome::Loaded { table, .. } => Some(table),
            LoadOutcome::Absent { .. } => None,
        }
    }

    /// Consumes the outcome, returning the loaded table if any.
    pub fn into_table(self) -> Option<FeatureTable> {
        match self {
            LoadOutcome::Loaded { table, .. } => Some(table),
            LoadOutcome::Absent { .. } => None,
        }
    }
}

/// Resolves candidate locations against the base path, in order.
pub fn resolve_candidates(base: &Path, candidates: &[PathBuf]) -> Vec<PathBuf> {
    candidates.iter().map(|c| base.join(c)).collect()
}

/// Returns the first candidate that exists as a file.
pub fn locate(base: &Path, candidates: &[PathBuf]) -> Option<PathBuf> {
    resolve_candidates(base, candidates)
        .into_iter()
        .find(|path| path.is_file())
}

/// Loads a modality from the first existing candidate location.
///
/// Absence of every candidate is reported as [`LoadOutcome::Absent`]. The
/// first existing candidate is authoritative: if it cannot be parsed, the
/// error is returned and later candidates are not consulted.
pub fn load_modality(name: &str, base: &Path, candidates: &[PathBuf]) -> Result<LoadOutcome> {
    let Some(path) = locate(base, candidates) else {
        let searched = resolve_candidates(base, candidates);
        debug!(modality = name, searched = searched.len(), "no candidate found");
        return Ok(LoadOutcome::Absent { searched });
    };

    let table = read_feature_table(&path)?;
    info!(
        modality = name,
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded feature table"
    );
    Ok(LoadOutcome::Loaded { path, table })
}
