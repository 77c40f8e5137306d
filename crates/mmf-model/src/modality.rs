//! Modality descriptors and synthetic placeholder schemas.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Describes one feature source and how its columns are treated on fusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityDescriptor {
    /// Modality name (e.g., "tabular", "image", "audio").
    pub name: String,

    /// Whether this modality defines the target sample count.
    #[serde(default, rename = "primary")]
    pub is_primary: bool,

    /// Candidate file locations relative to the base path, tried in order.
    #[serde(default)]
    pub candidates: Vec<PathBuf>,

    /// Non-feature columns excluded from normalization and from fusion.
    #[serde(default)]
    pub identity_columns: BTreeSet<String>,

    /// Prefix prepended to secondary feature columns on fusion.
    #[serde(default, rename = "prefix")]
    pub namespace_prefix: Option<String>,

    /// Placeholder schema used when a secondary input is unavailable.
    #[serde(default)]
    pub synthetic: Option<SyntheticSchema>,
}

impl ModalityDescriptor {
    /// Creates a primary modality descriptor.
    pub fn primary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_primary: true,
            candidates: Vec::new(),
            identity_columns: BTreeSet::new(),
            namespace_prefix: None,
            synthetic: None,
        }
    }

    /// Creates a secondary modality descriptor with a namespace prefix.
    pub fn secondary(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_primary: false,
            candidates: Vec::new(),
            identity_columns: BTreeSet::new(),
            namespace_prefix: Some(prefix.into()),
            synthetic: None,
        }
    }

    /// Sets the candidate file locations.
    #[must_use]
    pub fn with_candidates<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the identity columns.
    #[must_use]
    pub fn with_identity_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the synthetic placeholder schema.
    #[must_use]
    pub fn with_synthetic(mut self, schema: SyntheticSchema) -> Self {
        self.synthetic = Some(schema);
        self
    }

    /// Returns true if the column is metadata rather than a feature.
    pub fn is_identity(&self, column: &str) -> bool {
        self.identity_columns.contains(column)
    }

    /// Returns the fused name for a feature column.
    ///
    /// Primary modalities keep their column names.
    pub fn namespaced(&self, column: &str) -> String {
        match self.namespace_prefix.as_deref() {
            Some(prefix) if !self.is_primary => format!("{prefix}_{column}"),
            _ => column.to_string(),
        }
    }

    /// Human-readable name used in reports ("image" -> "Image").
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Capitalizes the first character of a modality name.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered column layout of a synthetic placeholder table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticSchema {
    pub columns: Vec<SyntheticColumn>,
}

impl SyntheticSchema {
    /// Creates a schema from columns in output order.
    pub fn new(columns: Vec<SyntheticColumn>) -> Self {
        Self { columns }
    }

    /// Names of the numeric feature columns.
    pub fn feature_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|column| match column {
                SyntheticColumn::Feature { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One column of a synthetic placeholder table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SyntheticColumn {
    /// Numeric feature drawn from a standard normal distribution.
    Feature { name: String },
    /// Label cycling through a fixed set by row position.
    Labels { name: String, labels: Vec<String> },
    /// Label built from a template where `{i}` is the row position.
    Indexed { name: String, template: String },
}

impl SyntheticColumn {
    /// Shorthand for a feature column.
    pub fn feature(name: impl Into<String>) -> Self {
        Self::Feature { name: name.into() }
    }

    /// Shorthand for a cycling label column.
    pub fn labels<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Labels {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a templated label column.
    pub fn indexed(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::Indexed {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        match self {
            SyntheticColumn::Feature { name }
            | SyntheticColumn::Labels { name, .. }
            | SyntheticColumn::Indexed { name, .. } => name,
        }
    }
}
