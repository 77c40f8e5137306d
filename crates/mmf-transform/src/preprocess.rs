//! Row pruning and missing-value imputation.

use std::collections::HashMap;

use mmf_model::{ColumnKind, FeatureTable};
use tracing::debug;

use crate::error::Result;

/// Cleans a feature table.
///
/// Rows whose every value is missing are dropped. Remaining gaps in numeric
/// columns are filled with the column mean and gaps in categorical columns
/// with the column mode. Columns with no present values are left untouched.
pub fn preprocess(table: &FeatureTable) -> Result<FeatureTable> {
    let mut table = drop_empty_rows(table)?;
    let mut imputed = 0usize;

    for name in table.column_names() {
        if table.column_missing(&name)? == 0 {
            continue;
        }
        let filled = match table.kind(&name) {
            Some(ColumnKind::Numeric) => fill_numeric(&table, &name)?,
            Some(ColumnKind::Categorical) => fill_categorical(&table, &name)?,
            None => None,
        };
        if let Some(next) = filled {
            imputed += 1;
            table = next;
        }
    }

    debug!(
        rows = table.height(),
        imputed_columns = imputed,
        "preprocessed feature table"
    );
    Ok(table)
}

fn drop_empty_rows(table: &FeatureTable) -> Result<FeatureTable> {
    if table.width() == 0 {
        return Ok(table.clone());
    }

    let mut all_missing = vec![true; table.height()];
    for name in table.column_names() {
        for (row, missing) in table.missing_mask(&name)?.into_iter().enumerate() {
            if !missing {
                all_missing[row] = false;
            }
        }
    }

    let keep: Vec<usize> = all_missing
        .iter()
        .enumerate()
        .filter(|(_, missing)| !**missing)
        .map(|(row, _)| row)
        .collect();
    if keep.len() == table.height() {
        return Ok(table.clone());
    }

    debug!(
        dropped = table.height() - keep.len(),
        "dropped rows with no values"
    );
    Ok(table.take_rows(&keep)?)
}

fn fill_numeric(table: &FeatureTable, name: &str) -> Result<Option<FeatureTable>> {
    let values = table.numeric_values(name)?;
    let Some(fill) = mean(&values) else {
        return Ok(None);
    };
    let filled = values.into_iter().map(|v| Some(v.unwrap_or(fill))).collect();
    Ok(Some(table.with_numeric(name, filled)?))
}

fn fill_categorical(table: &FeatureTable, name: &str) -> Result<Option<FeatureTable>> {
    let values = table.text_values(name)?;
    let Some(fill) = mode(&values) else {
        return Ok(None);
    };
    let filled = values
        .into_iter()
        .map(|v| Some(v.unwrap_or_else(|| fill.clone())))
        .collect();
    Ok(Some(table.with_text(name, filled)?))
}

/// Arithmetic mean of the present values.
///
/// Accumulated as a running mean so that large finite inputs never overflow.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let mut running = None;
    for (seen, &value) in values.iter().flatten().enumerate() {
        let count = (seen + 1) as f64;
        running = Some(match running {
            None => value,
            Some(current) => current + (value / count - current / count),
        });
    }
    running
}

/// Most frequent present value; ties go to the value seen first.
pub fn mode(values: &[Option<String>]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for value in values.iter().flatten() {
        let count = counts.entry(value.as_str()).or_insert(0);
        if *count == 0 {
            order.push(value.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for value in order {
        let count = counts[value];
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use super::*;

    fn table(columns: Vec<Column>) -> FeatureTable {
        FeatureTable::from_columns(columns).unwrap()
    }

    #[test]
    fn test_mean_ignores_missing() {
        assert_eq!(mean(&[Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean(&[None, None]), None);
    }

    #[test]
    fn test_mean_of_extreme_values_stays_finite() {
        assert_eq!(mean(&[Some(-1e308), Some(1e308)]), Some(0.0));
        assert_eq!(mean(&[Some(1e308), None, Some(1e308)]), Some(1e308));
    }

    #[test]
    fn test_extreme_values_are_imputed() {
        let input = table(vec![
            Series::new("a".into(), [Some(f64::MAX), None, Some(f64::MAX)]).into_column(),
        ]);
        let output = preprocess(&input).unwrap();
        assert_eq!(
            output.numeric_values("a").unwrap(),
            vec![Some(f64::MAX), Some(f64::MAX), Some(f64::MAX)]
        );
    }

    #[test]
    fn test_mode_ties_go_to_first_seen() {
        let values = vec![
            Some("b".to_string()),
            Some("a".to_string()),
            None,
            Some("a".to_string()),
            Some("b".to_string()),
        ];
        assert_eq!(mode(&values).as_deref(), Some("b"));
        assert_eq!(mode(&[None]), None);
    }

    #[test]
    fn test_drops_rows_with_no_values() {
        let input = table(vec![
            Series::new("a".into(), [Some(1.0), None, Some(3.0)]).into_column(),
            Series::new("b".into(), [Some("x"), None, None]).into_column(),
        ]);
        let output = preprocess(&input).unwrap();
        assert_eq!(output.height(), 2);
        assert_eq!(
            output.numeric_values("a").unwrap(),
            vec![Some(1.0), Some(3.0)]
        );
        assert_eq!(
            output.text_values("b").unwrap(),
            vec![Some("x".to_string()), Some("x".to_string())]
        );
    }

    #[test]
    fn test_mean_fill() {
        let input = table(vec![
            Series::new("a".into(), [Some(1.0), None, Some(5.0)]).into_column(),
            Series::new("id".into(), [1.0, 2.0, 3.0]).into_column(),
        ]);
        let output = preprocess(&input).unwrap();
        assert_eq!(
            output.numeric_values("a").unwrap(),
            vec![Some(1.0), Some(3.0), Some(5.0)]
        );
        assert_eq!(output.missing_count(), 0);
    }

    #[test]
    fn test_all_missing_column_is_left_untouched() {
        let input = table(vec![
            Series::new("a".into(), [None::<f64>, None]).into_column(),
            Series::new("b".into(), [Some("x"), Some("y")]).into_column(),
        ]);
        let output = preprocess(&input).unwrap();
        assert_eq!(output.height(), 2);
        assert_eq!(output.column_missing("a").unwrap(), 2);
    }

    #[test]
    fn test_all_missing_categorical_is_left_untouched() {
        let input = table(vec![
            Series::new("x".into(), [1.0, 2.0, 3.0]).into_column(),
            Series::new("note".into(), [None::<&str>, None, None]).into_column(),
        ]);
        let output = preprocess(&input).unwrap();
        assert_eq!(output.kind("note"), Some(ColumnKind::Categorical));
        assert_eq!(output.text_values("note").unwrap(), vec![None, None, None]);
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let input = table(vec![
            Series::new("a".into(), [Some(2.0), None, Some(4.0), None]).into_column(),
            Series::new("b".into(), [Some("x"), Some("y"), None, Some("y")]).into_column(),
        ]);
        let once = preprocess(&input).unwrap();
        let twice = preprocess(&once).unwrap();
        assert!(once.frame().equals_missing(twice.frame()));
    }
}
