//! Error types for feature table ingestion.

use std::path::{Path, PathBuf};

use mmf_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading feature tables or configuration.
///
/// Absence of a candidate file is not an error; see
/// [`LoadOutcome::Absent`](crate::LoadOutcome::Absent).
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// File uses an unsupported text encoding.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// First line does not contain any column name.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// A header cell is blank.
    #[error("empty column name at position {position} in {path}")]
    EmptyColumnName { path: PathBuf, position: usize },

    /// A column name appears twice in the header.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { path: PathBuf, column: String },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Configuration Errors ===
    /// Modality configuration file is not valid TOML for a registry.
    #[error("invalid modality configuration {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Modality configuration parsed but failed validation.
    #[error("invalid modality configuration {path}: {source}")]
    Registry {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    /// Returns true if the error describes unreadable content at an existing
    /// path rather than a missing file.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::FileNotFound { .. })
    }

    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound { path }
            | Self::FileRead { path, .. }
            | Self::UnsupportedEncoding { path, .. }
            | Self::EmptyCsv { path }
            | Self::NoHeaderDetected { path }
            | Self::EmptyColumnName { path, .. }
            | Self::DuplicateColumn { path, .. }
            | Self::CsvParse { path, .. }
            | Self::ConfigParse { path, .. }
            | Self::Registry { path, .. } => path,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
