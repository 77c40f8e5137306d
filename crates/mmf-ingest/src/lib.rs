//! Feature table ingestion.
//!
//! This crate locates and parses the per-modality feature tables and the
//! optional modality registry configuration.
//!
//! # Features
//!
//! - **Candidate lookup**: one ordered-candidate search shared by every modality
//! - **CSV loading**: header validation and Polars parsing into [`mmf_model::FeatureTable`]
//! - **Configuration**: TOML modality registries
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mmf_ingest::{LoadOutcome, load_modality};
//! use mmf_model::ModalityRegistry;
//!
//! let registry = ModalityRegistry::default();
//! let audio = registry.get("audio").unwrap();
//! match load_modality(&audio.name, Path::new("."), &audio.candidates)? {
//!     LoadOutcome::Loaded { table, .. } => println!("{} rows", table.height()),
//!     LoadOutcome::Absent { searched } => println!("searched {searched:?}"),
//! }
//! ```

mod config;
mod csv;
mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{parse_header_line, read_feature_table, read_header, validate_encoding};

// === Candidate Lookup ===
pub use loader::{LoadOutcome, load_modality, locate, resolve_candidates};

// === Configuration ===
pub use config::{load_registry, parse_registry};
