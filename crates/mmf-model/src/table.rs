//! Feature table representation.
//!
//! A [`FeatureTable`] wraps a Polars DataFrame whose columns are always one of
//! two physical shapes: `Float64` for numeric features and `String` for
//! everything else. Construction canonicalizes incoming columns so that the
//! transformation stages never have to reason about integer, boolean or
//! temporal dtypes.
//!
//! Missing values are nulls. `NaN` in a numeric column and empty or
//! whitespace-only text in a categorical column are converted to null on
//! construction.

use polars::prelude::*;

use crate::error::{ModelError, Result};

/// Kind of a feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKind {
    /// Floating point values.
    Numeric,
    /// Free text or labels.
    Categorical,
}

impl ColumnKind {
    /// Label used for dtype breakdowns in reports.
    pub fn dtype_label(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "float64",
            ColumnKind::Categorical => "str",
        }
    }
}

/// An ordered set of uniquely named columns sharing one row count.
///
/// Every transformation returns a new table; the wrapped frame is never
/// mutated through a shared reference.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    data: DataFrame,
}

impl FeatureTable {
    /// Build a table from an arbitrary DataFrame, canonicalizing dtypes.
    pub fn from_frame(frame: &DataFrame) -> Result<Self> {
        Self::from_columns(frame.get_columns().to_vec())
    }

    /// Build a table from columns, canonicalizing dtypes.
    ///
    /// Fails on duplicate names or unequal column lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let canonical = columns
            .iter()
            .map(canonical_column)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            data: DataFrame::new(canonical)?,
        })
    }

    /// Returns the wrapped DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes the table and returns the wrapped DataFrame.
    pub fn into_frame(self) -> DataFrame {
        self.data
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_columns()
            .iter()
            .map(|column| column.name().as_str().to_string())
            .collect()
    }

    /// Columns in table order.
    pub fn columns(&self) -> &[Column] {
        self.data.get_columns()
    }

    /// Returns true if the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    /// Returns the kind of a column, or None if it does not exist.
    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        let column = self.data.column(name).ok()?;
        Some(kind_of(column.dtype()))
    }

    /// Names of all columns of the given kind, in table order.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.data
            .get_columns()
            .iter()
            .filter(|column| kind_of(column.dtype()) == kind)
            .map(|column| column.name().as_str().to_string())
            .collect()
    }

    /// Values of a numeric column.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.column(name)?;
        if kind_of(column.dtype()) != ColumnKind::Numeric {
            return Err(ModelError::ColumnKind {
                column: name.to_string(),
                expected: "numeric",
            });
        }
        Ok(column.f64()?.into_iter().collect())
    }

    /// Values of a categorical column.
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self.column(name)?;
        if kind_of(column.dtype()) != ColumnKind::Categorical {
            return Err(ModelError::ColumnKind {
                column: name.to_string(),
                expected: "categorical",
            });
        }
        Ok(column
            .str()?
            .iter()
            .map(|value| value.map(str::to_string))
            .collect())
    }

    /// Per-row missing flags for a column.
    pub fn missing_mask(&self, name: &str) -> Result<Vec<bool>> {
        let column = self.column(name)?;
        Ok(column
            .is_null()
            .into_iter()
            .map(|flag| flag.unwrap_or(false))
            .collect())
    }

    /// Number of missing values in one column.
    pub fn column_missing(&self, name: &str) -> Result<usize> {
        Ok(self.column(name)?.null_count())
    }

    /// Total number of missing values across all columns.
    pub fn missing_count(&self) -> usize {
        self.data
            .get_columns()
            .iter()
            .map(Column::null_count)
            .sum()
    }

    /// Returns a copy with the named numeric column replaced.
    pub fn with_numeric(&self, name: &str, values: Vec<Option<f64>>) -> Result<Self> {
        let mut data = self.data.clone();
        data.with_column(Series::new(name.into(), values))?;
        Self::from_columns(data.get_columns().to_vec())
    }

    /// Returns a copy with the named categorical column replaced.
    pub fn with_text(&self, name: &str, values: Vec<Option<String>>) -> Result<Self> {
        let mut data = self.data.clone();
        data.with_column(Series::new(name.into(), values))?;
        Self::from_columns(data.get_columns().to_vec())
    }

    /// Returns a new table holding the given rows, in the given order.
    ///
    /// Indices may repeat. The result is densely indexed from zero.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        let idx: Vec<IdxSize> = indices.iter().map(|&i| i as IdxSize).collect();
        let idx = IdxCa::from_vec("idx".into(), idx);
        Ok(Self {
            data: self.data.take(&idx)?,
        })
    }

    /// Returns the first `n` rows for previews.
    pub fn head(&self, n: usize) -> DataFrame {
        self.data.head(Some(n))
    }

    fn column(&self, name: &str) -> Result<&Column> {
        self.data
            .column(name)
            .map_err(|_| ModelError::ColumnNotFound {
                column: name.to_string(),
            })
    }
}

/// Returns true for integer and floating point dtypes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn kind_of(dtype: &DataType) -> ColumnKind {
    if matches!(dtype, DataType::Float64) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

fn canonical_column(column: &Column) -> Result<Column> {
    let name = column.name().clone();
    if is_numeric_dtype(column.dtype()) {
        let cast = column.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = cast
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        Ok(Series::new(name, values).into_column())
    } else {
        let cast = column.cast(&DataType::String)?;
        let values: Vec<Option<String>> = cast
            .str()?
            .iter()
            .map(|value| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(str::to_string)
            })
            .collect();
        Ok(Series::new(name, values).into_column())
    }
}
