//! Summary statistics of a fused dataset.

use std::collections::BTreeMap;

use mmf_model::{
    ColumnKind, FeatureTable, IntegrationSummary, ModalityCatalog, ModalityFeatureCount,
};

/// Records the final column names a modality contributed.
pub fn catalog(modality: impl Into<String>, columns: Vec<String>) -> ModalityCatalog {
    ModalityCatalog {
        modality: modality.into(),
        columns,
    }
}

/// Computes the summary of a fused table.
///
/// `catalogs` lists each modality's contribution in declaration order; their
/// sizes become the feature breakdown.
pub fn summarize(fused: &FeatureTable, catalogs: &[ModalityCatalog]) -> IntegrationSummary {
    let numeric_features = fused.columns_of_kind(ColumnKind::Numeric).len();
    let categorical_features = fused.columns_of_kind(ColumnKind::Categorical).len();

    let mut dtype_counts = BTreeMap::new();
    for (kind, count) in [
        (ColumnKind::Numeric, numeric_features),
        (ColumnKind::Categorical, categorical_features),
    ] {
        if count > 0 {
            dtype_counts.insert(kind.dtype_label().to_string(), count);
        }
    }

    IntegrationSummary {
        total_samples: fused.height(),
        total_features: fused.width(),
        dtype_counts,
        missing_values: fused.missing_count(),
        numeric_features,
        categorical_features,
        modality_features: catalogs
            .iter()
            .map(|catalog| ModalityFeatureCount {
                modality: catalog.modality.clone(),
                features: catalog.columns.len(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    use super::*;

    #[test]
    fn test_summarize_counts() {
        let fused = FeatureTable::from_columns(vec![
            Series::new("a".into(), [Some(0.5), None]).into_column(),
            Series::new("b".into(), ["x", "y"]).into_column(),
            Series::new("img_f".into(), [0.0, 1.0]).into_column(),
        ])
        .unwrap();
        let catalogs = vec![
            catalog("tabular", vec!["a".to_string(), "b".to_string()]),
            catalog("image", vec!["img_f".to_string()]),
        ];

        let summary = summarize(&fused, &catalogs);
        assert_eq!(summary.total_samples, 2);
        assert_eq!(summary.total_features, 3);
        assert_eq!(summary.missing_values, 1);
        assert_eq!(summary.numeric_features, 2);
        assert_eq!(summary.categorical_features, 1);
        assert_eq!(summary.dtype_counts.get("float64"), Some(&2));
        assert_eq!(summary.dtype_counts.get("str"), Some(&1));
        assert_eq!(summary.features_for("image"), Some(1));
    }

    #[test]
    fn test_absent_kind_is_not_listed() {
        let fused =
            FeatureTable::from_columns(vec![Series::new("a".into(), [1.0]).into_column()])
                .unwrap();
        let summary = summarize(&fused, &[]);
        assert!(!summary.dtype_counts.contains_key("str"));
        assert_eq!(summary.categorical_features, 0);
    }
}
