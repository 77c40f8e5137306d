//! Integration summary types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate statistics of a fused dataset.
///
/// Derived from the fused table after every run and persisted as a side
/// artifact. Never fed back into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSummary {
    pub total_samples: usize,
    pub total_features: usize,
    /// Column counts keyed by dtype label ("float64", "str").
    pub dtype_counts: BTreeMap<String, usize>,
    pub missing_values: usize,
    pub numeric_features: usize,
    pub categorical_features: usize,
    /// Feature counts per modality, in declaration order.
    pub modality_features: Vec<ModalityFeatureCount>,
}

/// Feature count contributed by one modality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityFeatureCount {
    pub modality: String,
    pub features: usize,
}

/// Final column names contributed by one modality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityCatalog {
    pub modality: String,
    pub columns: Vec<String>,
}

impl IntegrationSummary {
    /// Feature count for a modality, if it took part in the run.
    pub fn features_for(&self, modality: &str) -> Option<usize> {
        self.modality_features
            .iter()
            .find(|entry| entry.modality == modality)
            .map(|entry| entry.features)
    }
}
