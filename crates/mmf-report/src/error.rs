//! Error types for artifact persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while persisting run artifacts.
///
/// None of these abort a run; callers log and record them.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to serialize {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    /// Path of the artifact or directory that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            ReportError::CreateDir { path, .. }
            | ReportError::Write { path, .. }
            | ReportError::Csv { path, .. }
            | ReportError::Json { path, .. } => path,
        }
    }
}

/// Result alias for artifact writers.
pub type Result<T> = std::result::Result<T, ReportError>;
