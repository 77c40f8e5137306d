//! Tests for the default modality registry and pipeline context.

use mmf_model::{
    IMAGE_FEATURE_COUNT, IntegrationOptions, MFCC_COUNT, ModalityRegistry, PipelineContext,
    SyntheticColumn,
};

#[test]
fn test_default_registry_layout() {
    let registry = ModalityRegistry::default();
    let names: Vec<&str> = registry.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["tabular", "image", "audio"]);
    assert_eq!(registry.primary().name, "tabular");
    assert!(registry.primary().synthetic.is_none());

    let image = registry.get("image").unwrap();
    let schema = image.synthetic.as_ref().unwrap();
    assert_eq!(schema.feature_names().len(), IMAGE_FEATURE_COUNT);
    assert_eq!(schema.feature_names()[0], "img_feature_0");

    let audio = registry.get("audio").unwrap();
    let schema = audio.synthetic.as_ref().unwrap();
    assert_eq!(schema.feature_names().len(), MFCC_COUNT + 2);
    assert!(
        schema
            .columns
            .contains(&SyntheticColumn::indexed("filename", "audio_{i}.wav"))
    );
}

#[test]
fn test_synthetic_modalities_get_distinct_seeds() {
    let context = PipelineContext::new(IntegrationOptions::new(".").with_seed(7));
    assert_eq!(context.alignment_seed(), 7);
    assert_ne!(
        context.synthesis_seed("image"),
        context.synthesis_seed("audio")
    );
}
