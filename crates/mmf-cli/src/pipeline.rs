//! Integration pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Primary**: load, preprocess and normalize the primary modality
//! 2. **Secondary**: for each secondary modality, load or synthesize, then
//!    preprocess, normalize, align to the primary row count and namespace
//! 3. **Fuse**: concatenate every modality column-wise
//! 4. **Report**: summarize and persist artifacts
//!
//! Each stage takes the [`PipelineContext`] by reference and returns typed
//! results.

use std::path::PathBuf;
use std::time::Instant;

use mmf_ingest::{LoadOutcome, load_modality, resolve_candidates};
use mmf_model::{
    FeatureTable, IntegrationOptions, IntegrationSummary, ModalityCatalog, ModalityDescriptor,
    PipelineContext,
};
use mmf_report::{WriteReport, catalog, summarize, write_artifacts};
use mmf_transform::{
    FusionPart, TransformError, align, fuse, namespace, normalize, preprocess, synthesize,
};
use tracing::{debug, info, info_span, warn};

use crate::error::PipelineError;
use crate::types::{IntegrationResult, ModalityOutcome, ModalitySource};

/// A modality ready for fusion.
#[derive(Debug, Clone)]
pub struct PreparedModality {
    pub outcome: ModalityOutcome,
    /// Aligned, namespaced table.
    pub table: FeatureTable,
    pub catalog: ModalityCatalog,
}

fn transform_error(modality: &ModalityDescriptor) -> impl Fn(TransformError) -> PipelineError {
    let name = modality.name.clone();
    move |source| PipelineError::Transform {
        modality: name.clone(),
        source,
    }
}

// ============================================================================
// Stage 1: Primary
// ============================================================================

/// Loads the primary modality. Absence or a parse failure is fatal.
pub fn load_primary(context: &PipelineContext) -> Result<(PathBuf, FeatureTable), PipelineError> {
    let primary = context.registry.primary();
    let expected = resolve_candidates(context.base_path(), &primary.candidates)
        .into_iter()
        .next()
        .unwrap_or_else(|| context.base_path().to_path_buf());

    match load_modality(&primary.name, context.base_path(), &primary.candidates) {
        Ok(LoadOutcome::Loaded { path, table }) => Ok((path, table)),
        Ok(LoadOutcome::Absent { .. }) => Err(PipelineError::MissingPrimaryData {
            modality: primary.name.clone(),
            expected,
            source: None,
        }),
        Err(error) => Err(PipelineError::MissingPrimaryData {
            modality: primary.name.clone(),
            expected: error.path().to_path_buf(),
            source: Some(error),
        }),
    }
}

/// Loads, preprocesses and normalizes the primary modality.
pub fn prepare_primary(context: &PipelineContext) -> Result<PreparedModality, PipelineError> {
    let primary = context.registry.primary();
    let (path, raw) = load_primary(context)?;
    let to_error = transform_error(primary);

    let cleaned = preprocess(&raw).map_err(&to_error)?;
    let normalized = normalize(&cleaned, &primary.identity_columns).map_err(&to_error)?;
    let table = namespace(&normalized, primary).map_err(&to_error)?;

    info!(
        modality = %primary.name,
        rows_in = raw.height(),
        rows_out = table.height(),
        columns = table.width(),
        "primary modality prepared"
    );
    Ok(PreparedModality {
        outcome: ModalityOutcome {
            name: primary.name.clone(),
            is_primary: true,
            source: ModalitySource::Loaded { path },
            rows_in: raw.height(),
            rows_out: table.height(),
            features: table.width(),
        },
        catalog: catalog(&primary.name, table.column_names()),
        table,
    })
}

// ============================================================================
// Stage 2: Secondary
// ============================================================================

/// Loads a secondary modality.
///
/// Absent and malformed sources are recovered and reported through the
/// returned [`ModalitySource`]; only a loaded source yields a table.
pub fn load_secondary(
    context: &PipelineContext,
    modality: &ModalityDescriptor,
) -> (ModalitySource, Option<FeatureTable>) {
    match load_modality(&modality.name, context.base_path(), &modality.candidates) {
        Ok(LoadOutcome::Loaded { path, table }) => (ModalitySource::Loaded { path }, Some(table)),
        Ok(LoadOutcome::Absent { searched }) => {
            warn!(
                modality = %modality.name,
                searched = searched.len(),
                "secondary modality not found, using synthetic data"
            );
            (ModalitySource::Absent, None)
        }
        // Removed between lookup and read.
        Err(error) if !error.is_malformed() => {
            warn!(
                modality = %modality.name,
                path = %error.path().display(),
                "secondary modality not found, using synthetic data"
            );
            (ModalitySource::Absent, None)
        }
        Err(error) => {
            let path = error.path().to_path_buf();
            warn!(
                modality = %modality.name,
                path = %path.display(),
                reason = %error,
                "secondary modality is malformed, using synthetic data"
            );
            (
                ModalitySource::Malformed {
                    path,
                    reason: error.to_string(),
                },
                None,
            )
        }
    }
}

/// Brings one secondary modality to `target` rows under its namespace.
pub fn prepare_secondary(
    context: &PipelineContext,
    modality: &ModalityDescriptor,
    target: usize,
) -> Result<PreparedModality, PipelineError> {
    let to_error = transform_error(modality);
    let (mut source, loaded) = load_secondary(context, modality);

    let mut rows_in = 0;
    let mut cleaned = None;
    if let Some(table) = loaded {
        rows_in = table.height();
        let table = preprocess(&table).map_err(&to_error)?;
        if table.height() == 0 && target > 0 {
            if let ModalitySource::Loaded { path } = source {
                warn!(
                    modality = %modality.name,
                    path = %path.display(),
                    "secondary modality has no usable rows, using synthetic data"
                );
                source = ModalitySource::Empty { path };
            }
        } else {
            cleaned = Some(table);
        }
    }

    let cleaned = match cleaned {
        Some(table) => table,
        None => {
            let schema =
                modality
                    .synthetic
                    .as_ref()
                    .ok_or_else(|| PipelineError::NoSyntheticSchema {
                        modality: modality.name.clone(),
                    })?;
            let seed = context.synthesis_seed(&modality.name);
            let synthetic = synthesize(schema, target, seed).map_err(&to_error)?;
            info!(
                modality = %modality.name,
                rows = synthetic.height(),
                columns = synthetic.width(),
                seed,
                "generated synthetic features"
            );
            rows_in = synthetic.height();
            preprocess(&synthetic).map_err(&to_error)?
        }
    };

    let normalized = normalize(&cleaned, &modality.identity_columns).map_err(&to_error)?;
    let aligned = align(&normalized, target, context.alignment_seed()).map_err(&to_error)?;
    let table = namespace(&aligned, modality).map_err(&to_error)?;

    info!(
        modality = %modality.name,
        source = source.label(),
        rows_in,
        rows_out = aligned.height(),
        features = table.width(),
        "secondary modality prepared"
    );
    Ok(PreparedModality {
        outcome: ModalityOutcome {
            name: modality.name.clone(),
            is_primary: false,
            source,
            rows_in,
            rows_out: aligned.height(),
            features: table.width(),
        },
        catalog: catalog(&modality.name, table.column_names()),
        table,
    })
}

// ============================================================================
// Stage 3: Fuse
// ============================================================================

/// Concatenates prepared modalities column-wise in declaration order.
pub fn fuse_modalities(
    target: usize,
    prepared: &[PreparedModality],
) -> Result<FeatureTable, PipelineError> {
    let parts: Vec<FusionPart> = prepared
        .iter()
        .map(|modality| FusionPart::new(&modality.outcome.name, modality.table.clone()))
        .collect();
    let fused = fuse(target, &parts)?;
    info!(
        rows = fused.height(),
        columns = fused.width(),
        "integration successful"
    );
    Ok(fused)
}

// ============================================================================
// Stage 4: Report
// ============================================================================

/// Summarizes the fused table and, unless in dry-run mode, writes artifacts.
pub fn report(
    options: &IntegrationOptions,
    fused: &FeatureTable,
    catalogs: &[ModalityCatalog],
) -> (IntegrationSummary, WriteReport) {
    let summary = summarize(fused, catalogs);
    if options.dry_run {
        info!(output_dir = %options.output_dir.display(), "dry run, skipping artifacts");
        return (summary, WriteReport::default());
    }
    let written = write_artifacts(&options.output_dir, fused, &summary, catalogs);
    (summary, written)
}

/// Runs every stage.
pub fn run_integration(context: &PipelineContext) -> Result<IntegrationResult, PipelineError> {
    let options = &context.options;
    let run_span = info_span!("integrate", base_path = %options.base_path.display());
    let _run_guard = run_span.enter();

    let primary_start = Instant::now();
    let primary_span = info_span!("primary", modality = %context.registry.primary().name);
    let primary = primary_span.in_scope(|| prepare_primary(context))?;
    let target = primary.table.height();
    info!(
        target_rows = target,
        duration_ms = primary_start.elapsed().as_millis(),
        "primary stage complete"
    );

    let mut prepared = vec![primary];
    for modality in context.registry.secondaries() {
        let start = Instant::now();
        let span = info_span!("secondary", modality = %modality.name);
        let result = span.in_scope(|| prepare_secondary(context, modality, target))?;
        debug!(
            modality = %modality.name,
            duration_ms = start.elapsed().as_millis(),
            "secondary stage complete"
        );
        prepared.push(result);
    }

    let fused = info_span!("fuse").in_scope(|| fuse_modalities(target, &prepared))?;

    let catalogs: Vec<ModalityCatalog> = prepared.iter().map(|m| m.catalog.clone()).collect();
    let (summary, written) =
        info_span!("report").in_scope(|| report(options, &fused, &catalogs));

    Ok(IntegrationResult {
        output_dir: options.output_dir.clone(),
        dry_run: options.dry_run,
        modalities: prepared.into_iter().map(|m| m.outcome).collect(),
        fused,
        summary,
        catalogs,
        artifacts: written.written.into_iter().map(|(_, path)| path).collect(),
        artifact_failures: written.failures,
    })
}
