//! CSV file reading into feature tables.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use mmf_model::FeatureTable;
use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{parse_header_line, validate_columns};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads and validates the header row.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(open(path)?);
    let Some(line) = reader.lines().next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let line = line.map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
    if line.trim().is_empty() {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let columns = parse_header_line(line);
    validate_columns(path, &columns)?;
    Ok(columns)
}

/// Reads a delimited file with a header row into a [`FeatureTable`].
///
/// Integer and floating point columns become numeric; every other column is
/// read as text. A header-only file yields a table with zero rows.
pub fn read_feature_table(path: &Path) -> Result<FeatureTable> {
    validate_encoding(path)?;
    let headers = read_header(path)?;

    // Scan every row so a late text value demotes the column to text instead
    // of failing the parse.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() != headers.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header declares {} columns but {} were parsed",
                headers.len(),
                df.width()
            ),
        });
    }

    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(&headers)
        .map(|(column, name)| column.clone().with_name(name.as_str().into()))
        .collect();

    let table = FeatureTable::from_columns(columns).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if table.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = table.width(),
            "feature table has more than 500 columns"
        );
    }

    Ok(table)
}
