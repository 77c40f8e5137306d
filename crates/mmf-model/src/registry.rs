//! Ordered modality registry.
//!
//! Declaration order is fusion order: the primary modality's columns come
//! first, followed by each secondary modality in the order it was declared.

use std::collections::BTreeSet;

use crate::error::{ModelError, Result};
use crate::modality::{ModalityDescriptor, SyntheticColumn, SyntheticSchema};

/// Number of numeric features produced by the image feature extractor.
pub const IMAGE_FEATURE_COUNT: usize = 217;

/// Number of MFCC coefficients produced by the audio feature extractor.
pub const MFCC_COUNT: usize = 13;

/// A validated, ordered set of modalities with exactly one primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalityRegistry {
    modalities: Vec<ModalityDescriptor>,
}

impl ModalityRegistry {
    /// Validates and wraps modality descriptors.
    pub fn new(modalities: Vec<ModalityDescriptor>) -> Result<Self> {
        let mut names = BTreeSet::new();
        let mut prefixes = BTreeSet::new();
        let mut primary: Option<&str> = None;
        for modality in &modalities {
            if !names.insert(modality.name.as_str()) {
                return Err(ModelError::DuplicateModality {
                    name: modality.name.clone(),
                });
            }
            if modality.is_primary {
                if let Some(first) = primary {
                    return Err(ModelError::MultiplePrimaryModalities {
                        first: first.to_string(),
                        second: modality.name.clone(),
                    });
                }
                primary = Some(&modality.name);
            } else {
                let prefix = modality
                    .namespace_prefix
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| ModelError::MissingPrefix {
                        name: modality.name.clone(),
                    })?;
                if !prefixes.insert(prefix) {
                    return Err(ModelError::DuplicatePrefix {
                        prefix: prefix.to_string(),
                    });
                }
            }
            if let Some(schema) = &modality.synthetic {
                for column in &schema.columns {
                    if let SyntheticColumn::Labels { name, labels } = column
                        && labels.is_empty()
                    {
                        return Err(ModelError::EmptyLabelCycle {
                            modality: modality.name.clone(),
                            column: name.clone(),
                        });
                    }
                }
            }
        }
        if primary.is_none() {
            return Err(ModelError::NoPrimaryModality);
        }
        Ok(Self { modalities })
    }

    /// The primary modality.
    pub fn primary(&self) -> &ModalityDescriptor {
        self.modalities
            .iter()
            .find(|m| m.is_primary)
            .unwrap_or(&self.modalities[0])
    }

    /// Secondary modalities in declaration order.
    pub fn secondaries(&self) -> impl Iterator<Item = &ModalityDescriptor> {
        self.modalities.iter().filter(|m| !m.is_primary)
    }

    /// All modalities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModalityDescriptor> {
        self.modalities.iter()
    }

    /// Position of a modality in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.modalities.iter().position(|m| m.name == name)
    }

    /// Looks up a modality by name.
    pub fn get(&self, name: &str) -> Option<&ModalityDescriptor> {
        self.modalities.iter().find(|m| m.name == name)
    }

    /// Number of modalities.
    pub fn len(&self) -> usize {
        self.modalities.len()
    }

    /// Always false for a validated registry; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.modalities.is_empty()
    }
}

impl Default for ModalityRegistry {
    /// Tabular product features (primary), facial image features and voice
    /// audio features.
    fn default() -> Self {
        Self {
            modalities: vec![tabular_modality(), image_modality(), audio_modality()],
        }
    }
}

fn tabular_modality() -> ModalityDescriptor {
    ModalityDescriptor::primary("tabular")
        .with_candidates(["product_recommendation/merged_dataset.csv"])
}

fn image_modality() -> ModalityDescriptor {
    let mut columns: Vec<SyntheticColumn> = (0..IMAGE_FEATURE_COUNT)
        .map(|i| SyntheticColumn::feature(format!("img_feature_{i}")))
        .collect();
    columns.push(SyntheticColumn::labels(
        "member",
        ["Member1", "Member2", "Member3", "Member4"],
    ));
    columns.push(SyntheticColumn::labels(
        "augmentation",
        [
            "original",
            "rotated_15",
            "rotated_-15",
            "flipped",
            "grayscale",
            "brightness_up",
            "brightness_down",
            "blurred",
        ],
    ));
    ModalityDescriptor::secondary("image", "img")
        .with_candidates([
            "face_recognition/features/image_features.csv",
            "face_recognition/image_features.csv",
            "image_features.csv",
        ])
        .with_identity_columns(["member", "augmentation"])
        .with_synthetic(SyntheticSchema::new(columns))
}

fn audio_modality() -> ModalityDescriptor {
    let mut columns: Vec<SyntheticColumn> = (1..=MFCC_COUNT)
        .map(|i| SyntheticColumn::feature(format!("mfcc{i}")))
        .collect();
    columns.push(SyntheticColumn::indexed("filename", "audio_{i}.wav"));
    columns.push(SyntheticColumn::feature("rolloff"));
    columns.push(SyntheticColumn::feature("energy"));
    columns.push(SyntheticColumn::labels(
        "label",
        ["Speaker1", "Speaker2", "Speaker3", "Speaker4"],
    ));
    ModalityDescriptor::secondary("audio", "audio")
        .with_candidates(["audio_features.csv"])
        .with_identity_columns(["filename", "label"])
        .with_synthetic(SyntheticSchema::new(columns))
}
