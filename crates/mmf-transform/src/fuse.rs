//! Namespacing and column-wise fusion of aligned modality tables.

use std::collections::BTreeMap;

use mmf_model::{FeatureTable, ModalityDescriptor};
use polars::prelude::*;
use tracing::debug;

use crate::error::{FusionError, Result};

/// One modality's contribution to the fused table.
#[derive(Debug, Clone)]
pub struct FusionPart {
    pub modality: String,
    pub table: FeatureTable,
}

impl FusionPart {
    pub fn new(modality: impl Into<String>, table: FeatureTable) -> Self {
        Self {
            modality: modality.into(),
            table,
        }
    }
}

/// Prepares a modality's table for fusion.
///
/// The primary table passes through whole. A secondary table loses its
/// identity columns and every remaining column gains the modality prefix.
pub fn namespace(table: &FeatureTable, modality: &ModalityDescriptor) -> Result<FeatureTable> {
    if modality.is_primary {
        return Ok(table.clone());
    }

    let columns: Vec<Column> = table
        .columns()
        .iter()
        .filter(|column| !modality.is_identity(column.name().as_str()))
        .map(|column| {
            let renamed = modality.namespaced(column.name().as_str());
            column.clone().with_name(renamed.as_str().into())
        })
        .collect();

    debug!(
        modality = %modality.name,
        kept = columns.len(),
        dropped = table.width() - columns.len(),
        "namespaced columns"
    );
    Ok(FeatureTable::from_columns(columns)?)
}

/// Concatenates parts column-wise in order.
///
/// Every part must already have `rows` rows and no two parts may contribute
/// a column with the same name. A part without columns contributes nothing.
pub fn fuse(rows: usize, parts: &[FusionPart]) -> std::result::Result<FeatureTable, FusionError> {
    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    let mut columns = Vec::new();

    for part in parts {
        if part.table.width() == 0 {
            debug!(modality = %part.modality, "no feature columns to fuse");
            continue;
        }
        if part.table.height() != rows {
            return Err(FusionError::RowCountMismatch {
                modality: part.modality.clone(),
                expected: rows,
                actual: part.table.height(),
            });
        }
        for column in part.table.columns() {
            let name = column.name().as_str();
            if let Some(first) = owners.get(name) {
                return Err(FusionError::ColumnCollision {
                    column: name.to_string(),
                    first: first.to_string(),
                    second: part.modality.clone(),
                });
            }
            owners.insert(name.to_string(), &part.modality);
            columns.push(column.clone());
        }
    }

    let fused = FeatureTable::from_columns(columns)?;
    debug!(
        rows = fused.height(),
        columns = fused.width(),
        parts = parts.len(),
        "fused modalities"
    );
    Ok(fused)
}
