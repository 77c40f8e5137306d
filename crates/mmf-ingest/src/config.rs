//! Modality registry configuration files.
//!
//! ```toml
//! [[modality]]
//! name = "tabular"
//! primary = true
//! candidates = ["product_recommendation/merged_dataset.csv"]
//!
//! [[modality]]
//! name = "audio"
//! prefix = "audio"
//! candidates = ["audio_features.csv"]
//! identity_columns = ["filename", "label"]
//!
//! [modality.synthetic]
//! columns = [
//!     { kind = "feature", name = "mfcc1" },
//!     { kind = "indexed", name = "filename", template = "audio_{i}.wav" },
//!     { kind = "labels", name = "label", labels = ["Speaker1", "Speaker2"] },
//! ]
//! ```

use std::path::Path;

use mmf_model::{ModalityDescriptor, ModalityRegistry};
use serde::Deserialize;

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default, rename = "modality")]
    modalities: Vec<ModalityDescriptor>,
}

/// Parses and validates a registry from TOML text.
///
/// `path` is only used for error messages.
pub fn parse_registry(text: &str, path: &Path) -> Result<ModalityRegistry> {
    let file: RegistryFile = toml::from_str(text).map_err(|e| IngestError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    ModalityRegistry::new(file.modalities).map_err(|source| IngestError::Registry {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates a registry from a TOML file.
pub fn load_registry(path: &Path) -> Result<ModalityRegistry> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_registry(&text, path)
}
