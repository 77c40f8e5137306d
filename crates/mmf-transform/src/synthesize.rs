//! Seeded generation of stand-in tables for absent modalities.

use mmf_model::{FeatureTable, SyntheticColumn, SyntheticSchema};
use polars::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Generates `rows` rows following `schema`.
///
/// Feature columns draw independent standard-normal values from a generator
/// seeded with `seed`, column by column in schema order. Label columns cycle
/// through their labels by row index and indexed columns substitute the row
/// index for `{i}` in their template.
pub fn synthesize(schema: &SyntheticSchema, rows: usize, seed: u64) -> Result<FeatureTable> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut columns = Vec::with_capacity(schema.columns.len());

    for column in &schema.columns {
        let generated = match column {
            SyntheticColumn::Feature { name } => {
                let values: Vec<f64> = (0..rows)
                    .map(|_| {
                        let value: f64 = StandardNormal.sample(&mut rng);
                        value
                    })
                    .collect();
                Series::new(name.as_str().into(), values)
            }
            SyntheticColumn::Labels { name, labels } => {
                if labels.is_empty() {
                    return Err(TransformError::EmptyLabelCycle {
                        column: name.clone(),
                    });
                }
                let values: Vec<&str> = (0..rows)
                    .map(|row| labels[row % labels.len()].as_str())
                    .collect();
                Series::new(name.as_str().into(), values)
            }
            SyntheticColumn::Indexed { name, template } => {
                let values: Vec<String> = (0..rows)
                    .map(|row| template.replace("{i}", &row.to_string()))
                    .collect();
                Series::new(name.as_str().into(), values)
            }
        };
        columns.push(generated.into_column());
    }

    debug!(rows, columns = columns.len(), seed, "synthesized feature table");
    Ok(FeatureTable::from_columns(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmf_model::{ColumnKind, ModalityRegistry};

    fn audio_schema() -> SyntheticSchema {
        ModalityRegistry::default()
            .get("audio")
            .and_then(|m| m.synthetic.clone())
            .unwrap()
    }

    #[test]
    fn test_shape_and_kinds() {
        let schema = audio_schema();
        let table = synthesize(&schema, 6, 44).unwrap();

        assert_eq!(table.height(), 6);
        assert_eq!(table.width(), schema.columns.len());
        assert_eq!(table.kind("mfcc1"), Some(ColumnKind::Numeric));
        assert_eq!(table.kind("filename"), Some(ColumnKind::Categorical));
        assert_eq!(table.missing_count(), 0);
    }

    #[test]
    fn test_labels_cycle_and_templates() {
        let schema = audio_schema();
        let table = synthesize(&schema, 6, 1).unwrap();

        let labels = table.text_values("label").unwrap();
        assert_eq!(labels[0].as_deref(), Some("Speaker1"));
        assert_eq!(labels[3].as_deref(), Some("Speaker4"));
        assert_eq!(labels[4].as_deref(), Some("Speaker1"));

        let files = table.text_values("filename").unwrap();
        assert_eq!(files[0].as_deref(), Some("audio_0.wav"));
        assert_eq!(files[5].as_deref(), Some("audio_5.wav"));
    }

    #[test]
    fn test_same_seed_same_table() {
        let schema = audio_schema();
        let a = synthesize(&schema, 10, 7).unwrap();
        let b = synthesize(&schema, 10, 7).unwrap();
        let c = synthesize(&schema, 10, 8).unwrap();
        assert!(a.frame().equals(b.frame()));
        assert_ne!(
            a.numeric_values("mfcc1").unwrap(),
            c.numeric_values("mfcc1").unwrap()
        );
    }

    #[test]
    fn test_zero_rows() {
        let table = synthesize(&audio_schema(), 0, 42).unwrap();
        assert_eq!(table.height(), 0);
        assert!(table.has_column("mfcc13"));
    }

    #[test]
    fn test_empty_label_cycle_is_rejected() {
        let schema = SyntheticSchema::new(vec![SyntheticColumn::Labels {
            name: "who".to_string(),
            labels: Vec::new(),
        }]);
        assert!(matches!(
            synthesize(&schema, 3, 0),
            Err(TransformError::EmptyLabelCycle { .. })
        ));
    }
}
