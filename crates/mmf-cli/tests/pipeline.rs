//! End-to-end tests for the integration pipeline.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use mmf_cli::types::ModalitySource;
use mmf_cli::{PipelineError, run_integration};
use mmf_model::{
    ColumnKind, IMAGE_FEATURE_COUNT, IntegrationOptions, MFCC_COUNT, ModalityDescriptor,
    ModalityRegistry, PipelineContext,
};

const PRIMARY: &str = "product_recommendation/merged_dataset.csv";

fn write(base: &Path, relative: &str, contents: &str) {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn tabular_csv(rows: usize) -> String {
    let mut csv = String::from("customer_id,purchase_amount,category\n");
    for i in 0..rows {
        let amount = if i % 7 == 3 {
            String::new()
        } else {
            format!("{}", 10 + i * 3)
        };
        let category = ["books", "toys", "garden"][i % 3];
        csv.push_str(&format!("{},{amount},{category}\n", 100 + i));
    }
    csv
}

fn image_csv(rows: usize) -> String {
    let mut csv = String::from("member,augmentation,f0,f1\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "Member{},original,{},{}\n",
            i % 4 + 1,
            i as f64 * 0.5,
            (i % 9) as f64
        ));
    }
    csv
}

fn audio_csv(rows: usize) -> String {
    let mut csv = String::from("filename,label,mfcc1,energy\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "clip_{i}.wav,Speaker{},{},{}\n",
            i % 4 + 1,
            i as f64 - 15.0,
            i * i
        ));
    }
    csv
}

fn context(base: &Path) -> PipelineContext {
    PipelineContext::new(IntegrationOptions::new(base))
}

/// Primary 50 rows, image 80 rows, audio 30 rows.
#[test]
fn test_all_modalities_present() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(50));
    write(dir.path(), "face_recognition/image_features.csv", &image_csv(80));
    write(dir.path(), "audio_features.csv", &audio_csv(30));

    let result = run_integration(&context(dir.path())).unwrap();

    assert_eq!(result.fused.height(), 50);
    assert_eq!(
        result.fused.column_names(),
        vec![
            "customer_id",
            "purchase_amount",
            "category",
            "img_f0",
            "img_f1",
            "audio_mfcc1",
            "audio_energy"
        ]
    );
    assert!(result.synthesized().next().is_none());
    assert_eq!(result.modalities[1].rows_in, 80);
    assert_eq!(result.modalities[2].rows_in, 30);

    // Audio rows 0..20 repeat after the first 30.
    let audio = result.fused.numeric_values("audio_mfcc1").unwrap();
    assert_eq!(audio[..20], audio[30..]);

    for name in result.fused.columns_of_kind(ColumnKind::Numeric) {
        for value in result.fused.numeric_values(&name).unwrap().into_iter().flatten() {
            assert!((0.0..=1.0).contains(&value), "{name} = {value}");
        }
    }
    assert_eq!(result.summary.missing_values, 0);
    assert_eq!(result.summary.features_for("tabular"), Some(3));
    assert_eq!(result.summary.features_for("image"), Some(2));

    let out = dir.path().join("output");
    for name in [
        "integrated_features.csv",
        "integration_summary.txt",
        "modality_info.txt",
        "integration_summary.json",
    ] {
        assert!(out.join(name).is_file(), "{name}");
    }
    let summary = fs::read_to_string(out.join("integration_summary.txt")).unwrap();
    assert!(summary.contains("Total Samples: 50\n"));
    assert!(summary.contains("Image Features: 2\n"));
}

/// Primary 20 rows, no secondary files at all.
#[test]
fn test_absent_secondaries_are_synthesized() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(20));

    let result = run_integration(&context(dir.path())).unwrap();

    assert_eq!(result.fused.height(), 20);
    assert_eq!(result.fused.width(), 3 + IMAGE_FEATURE_COUNT + MFCC_COUNT + 2);
    assert_eq!(result.synthesized().count(), 2);
    assert!(
        result
            .modalities
            .iter()
            .skip(1)
            .all(|outcome| outcome.source == ModalitySource::Absent)
    );
    for name in result.fused.column_names() {
        if name.starts_with("img_") || name.starts_with("audio_") {
            assert_eq!(result.fused.column_missing(&name).unwrap(), 0, "{name}");
        }
    }
}

#[test]
fn test_malformed_secondary_is_recovered() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(12));
    write(dir.path(), "audio_features.csv", "mfcc1,mfcc1\n1,2\n");

    let result = run_integration(&context(dir.path())).unwrap();

    let audio = &result.modalities[2];
    assert!(matches!(audio.source, ModalitySource::Malformed { .. }));
    assert_eq!(audio.rows_out, 12);
    assert!(result.fused.has_column("audio_mfcc13"));
}

#[test]
fn test_missing_primary_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "audio_features.csv", &audio_csv(5));

    let error = run_integration(&context(dir.path())).unwrap_err();
    match error {
        PipelineError::MissingPrimaryData {
            modality, expected, ..
        } => {
            assert_eq!(modality, "tabular");
            assert_eq!(expected, dir.path().join(PRIMARY));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(8));

    let options = IntegrationOptions::new(dir.path()).with_dry_run(true);
    let result = run_integration(&PipelineContext::new(options)).unwrap();

    assert!(result.artifacts.is_empty());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_same_seed_same_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(25));
    write(dir.path(), "image_features.csv", &image_csv(60));

    let options = IntegrationOptions::new(dir.path()).with_dry_run(true);
    let first = run_integration(&PipelineContext::new(options.clone())).unwrap();
    let second = run_integration(&PipelineContext::new(options)).unwrap();
    assert!(first.fused.frame().equals(second.fused.frame()));
}

#[test]
fn test_absent_secondary_without_schema_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.csv", "id,x\n1,2\n2,3\n");

    let registry = ModalityRegistry::new(vec![
        ModalityDescriptor::primary("main").with_candidates(["main.csv"]),
        ModalityDescriptor::secondary("extra", "ex").with_candidates(["extra.csv"]),
    ])
    .unwrap();
    let context = context(dir.path()).with_registry(registry);

    assert!(matches!(
        run_integration(&context),
        Err(PipelineError::NoSyntheticSchema { .. })
    ));
}

#[test]
fn test_header_only_secondary_is_synthesized() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(9));
    write(dir.path(), "audio_features.csv", "filename,label,mfcc1,energy\n");

    let result = run_integration(&context(dir.path())).unwrap();

    let audio = &result.modalities[2];
    match &audio.source {
        ModalitySource::Empty { path } => {
            assert_eq!(path, &dir.path().join("audio_features.csv"));
        }
        other => panic!("unexpected source: {other:?}"),
    }
    assert_eq!(audio.rows_out, 9);
    assert_eq!(result.fused.height(), 9);
    assert!(result.fused.has_column("audio_mfcc13"));
    for name in result.fused.column_names() {
        if name.starts_with("audio_") {
            assert_eq!(result.fused.column_missing(&name).unwrap(), 0, "{name}");
        }
    }
}

#[test]
fn test_secondary_with_only_identity_columns_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PRIMARY, &tabular_csv(3));
    write(
        dir.path(),
        "audio_features.csv",
        "filename,label\nclip_0.wav,Speaker1\nclip_1.wav,Speaker2\n",
    );

    let result = run_integration(&context(dir.path())).unwrap();

    let audio = &result.modalities[2];
    assert!(matches!(audio.source, ModalitySource::Loaded { .. }));
    assert_eq!(audio.features, 0);
    assert_eq!(audio.rows_out, 3);
    assert_eq!(result.fused.height(), 3);
    assert!(
        !result
            .fused
            .column_names()
            .iter()
            .any(|name| name.starts_with("audio_"))
    );
    assert_eq!(result.summary.features_for("audio"), Some(0));
}
