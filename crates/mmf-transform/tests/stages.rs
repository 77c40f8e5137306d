//! Tests for the full transformation chain.

use std::collections::BTreeSet;

use mmf_model::{ColumnKind, FeatureTable, IMAGE_FEATURE_COUNT, MFCC_COUNT, ModalityRegistry};
use mmf_transform::{FusionPart, align, fuse, namespace, normalize, preprocess, synthesize};
use polars::prelude::*;

fn tabular(rows: usize) -> FeatureTable {
    let ids: Vec<f64> = (0..rows).map(|i| 1000.0 + i as f64).collect();
    let spend: Vec<Option<f64>> = (0..rows)
        .map(|i| (i % 4 != 0).then_some(i as f64 * 12.5))
        .collect();
    let segment: Vec<Option<&str>> = (0..rows)
        .map(|i| (i % 5 != 0).then_some(if i % 2 == 0 { "gold" } else { "silver" }))
        .collect();
    FeatureTable::from_columns(vec![
        Series::new("customer_id".into(), ids).into_column(),
        Series::new("spend".into(), spend).into_column(),
        Series::new("segment".into(), segment).into_column(),
    ])
    .unwrap()
}

fn assert_unit_range(table: &FeatureTable, identity: &BTreeSet<String>) {
    for name in table.columns_of_kind(ColumnKind::Numeric) {
        if identity.contains(&name) {
            continue;
        }
        for value in table.numeric_values(&name).unwrap().into_iter().flatten() {
            assert!((0.0..=1.0).contains(&value), "{name} = {value}");
        }
    }
}

/// Primary present, both secondaries synthesized.
#[test]
fn test_primary_only_chain() {
    let registry = ModalityRegistry::default();
    let primary = registry.primary();

    let base = preprocess(&tabular(50)).unwrap();
    assert_eq!(base.missing_count(), 0);
    let base = normalize(&base, &primary.identity_columns).unwrap();
    assert_unit_range(&base, &primary.identity_columns);

    let mut parts = vec![FusionPart::new(&primary.name, namespace(&base, primary).unwrap())];
    for (offset, modality) in registry.secondaries().enumerate() {
        let schema = modality.synthetic.as_ref().unwrap();
        let table = synthesize(schema, base.height(), 43 + offset as u64).unwrap();
        let table = preprocess(&table).unwrap();
        let table = normalize(&table, &modality.identity_columns).unwrap();
        assert_unit_range(&table, &modality.identity_columns);
        let table = align(&table, base.height(), 42).unwrap();
        parts.push(FusionPart::new(&modality.name, namespace(&table, modality).unwrap()));
    }

    let fused = fuse(base.height(), &parts).unwrap();
    assert_eq!(fused.height(), 50);
    // tabular 3 + image features + mfccs, rolloff, energy
    assert_eq!(fused.width(), 3 + IMAGE_FEATURE_COUNT + MFCC_COUNT + 2);
    assert!(fused.has_column("img_img_feature_0"));
    assert!(!fused.has_column("img_augmentation"));
    assert!(fused.has_column("audio_mfcc1"));
    assert!(!fused.has_column("audio_filename"));
    assert!(!fused.has_column("img_member"));

    let names = fused.column_names();
    let unique: BTreeSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
}

/// A short secondary is repeated to the primary length.
#[test]
fn test_short_secondary_is_repeated() {
    let audio: Vec<f64> = (0..30).map(f64::from).collect();
    let table = FeatureTable::from_columns(vec![
        Series::new("mfcc1".into(), audio).into_column(),
    ])
    .unwrap();
    let table = normalize(&preprocess(&table).unwrap(), &BTreeSet::new()).unwrap();
    let aligned = align(&table, 50, 42).unwrap();

    let values = aligned.numeric_values("mfcc1").unwrap();
    assert_eq!(values.len(), 50);
    assert_eq!(values[..20], values[30..]);
}

/// A long secondary is subsampled reproducibly.
#[test]
fn test_long_secondary_is_subsampled() {
    let images: Vec<f64> = (0..200).map(f64::from).collect();
    let table = FeatureTable::from_columns(vec![
        Series::new("f".into(), images).into_column(),
    ])
    .unwrap();

    let first = align(&table, 50, 42).unwrap();
    let second = align(&table, 50, 42).unwrap();
    assert_eq!(first.height(), 50);
    assert_eq!(
        first.numeric_values("f").unwrap(),
        second.numeric_values("f").unwrap()
    );
}

#[test]
fn test_stages_are_idempotent() {
    let identity = BTreeSet::from(["customer_id".to_string()]);
    let once = normalize(&preprocess(&tabular(20)).unwrap(), &identity).unwrap();
    let twice = normalize(&preprocess(&once).unwrap(), &identity).unwrap();
    assert!(once.frame().equals_missing(twice.frame()));
}
