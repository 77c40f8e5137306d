//! Min-max scaling of numeric feature columns.

use std::collections::BTreeSet;

use mmf_model::{ColumnKind, FeatureTable};
use tracing::debug;

use crate::error::Result;

/// Rescales every numeric, non-identity column into [0, 1].
///
/// Constant columns map to 0.0. Missing values stay missing and columns with
/// no present values are left as they are. Categorical and identity columns
/// pass through unchanged.
pub fn normalize(table: &FeatureTable, identity: &BTreeSet<String>) -> Result<FeatureTable> {
    let mut table = table.clone();
    let mut scaled = 0usize;

    for name in table.columns_of_kind(ColumnKind::Numeric) {
        if identity.contains(&name) {
            continue;
        }
        let values = table.numeric_values(&name)?;
        let Some(rescaled) = min_max(&values) else {
            continue;
        };
        table = table.with_numeric(&name, rescaled)?;
        scaled += 1;
    }

    debug!(columns = scaled, "normalized numeric columns");
    Ok(table)
}

/// Min-max scales the present values, or None if there are none.
pub fn min_max(values: &[Option<f64>]) -> Option<Vec<Option<f64>>> {
    let (min, max) = values
        .iter()
        .flatten()
        .fold(None, |range: Option<(f64, f64)>, &v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    // A range wider than f64::MAX is scaled on halved operands.
    let span = max - min;
    let scale = |v: f64| {
        if span.is_finite() {
            (v - min) / span
        } else {
            (v / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
        }
    };
    Some(
        values
            .iter()
            .map(|value| {
                value.map(|v| {
                    if span > 0.0 {
                        scale(v).clamp(0.0, 1.0)
                    } else {
                        0.0
                    }
                })
            })
            .collect(),
    )
}
