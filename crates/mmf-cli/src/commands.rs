use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use mmf_cli::run_integration;
use mmf_cli::types::IntegrationResult;
use mmf_ingest::load_registry;
use mmf_model::{IntegrationOptions, ModalityRegistry, PipelineContext};
use tracing::info;

use crate::cli::{IntegrateArgs, ModalitiesArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_integrate(args: &IntegrateArgs) -> Result<IntegrationResult> {
    let registry = registry_from(args.modalities.as_deref())?;
    let mut options = IntegrationOptions::new(&args.base_path)
        .with_seed(args.seed)
        .with_dry_run(args.dry_run);
    if let Some(dir) = &args.output_dir {
        options = options.with_output_dir(dir);
    }
    info!(
        base_path = %options.base_path.display(),
        output_dir = %options.output_dir.display(),
        seed = options.seed,
        modalities = registry.len(),
        "starting integration"
    );

    let context = PipelineContext::new(options).with_registry(registry);
    Ok(run_integration(&context)?)
}

pub fn run_modalities(args: &ModalitiesArgs) -> Result<()> {
    let registry = registry_from(args.modalities.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Modality"),
        header_cell("Role"),
        header_cell("Prefix"),
        header_cell("Identity Columns"),
        header_cell("Candidates"),
        header_cell("Synthetic Columns"),
    ]);
    apply_table_style(&mut table);
    for modality in registry.iter() {
        let identity = modality
            .identity_columns
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let candidates = modality
            .candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&modality.name),
            Cell::new(if modality.is_primary { "primary" } else { "secondary" }),
            optional_cell(modality.namespace_prefix.as_deref()),
            optional_cell(Some(identity.as_str()).filter(|s| !s.is_empty())),
            Cell::new(candidates),
            match &modality.synthetic {
                Some(schema) => Cell::new(schema.columns.len()),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
    Ok(())
}

fn registry_from(path: Option<&Path>) -> Result<ModalityRegistry> {
    match path {
        Some(path) => load_registry(path)
            .with_context(|| format!("load modalities from {}", path.display())),
        None => Ok(ModalityRegistry::default()),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}
