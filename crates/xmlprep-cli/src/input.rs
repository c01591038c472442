//! CSV input loading.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ExportError;

/// Header row and records of a CSV source, as raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads a CSV file. Records may have differing lengths.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<CsvTable, ExportError> {
    let reader = builder(delimiter)
        .from_path(path)
        .map_err(|source| ExportError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
    read_records(reader, path)
}

/// Reads CSV data from any reader; `source_name` is used in errors.
pub fn read_csv_from<R: Read>(
    input: R,
    delimiter: u8,
    source_name: &Path,
) -> Result<CsvTable, ExportError> {
    read_records(builder(delimiter).from_reader(input), source_name)
}

/// Reads only the header row of a CSV file.
pub fn read_csv_headers(path: &Path, delimiter: u8) -> Result<Vec<String>, ExportError> {
    let mut reader = builder(delimiter)
        .from_path(path)
        .map_err(|source| ExportError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
    header_row(&mut reader, path)
}

fn builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(delimiter).has_headers(true).flexible(true);
    builder
}

fn header_row<R: Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
) -> Result<Vec<String>, ExportError> {
    let record = reader.headers().map_err(|source| ExportError::CsvRead {
        path: path.to_path_buf(),
        source,
    })?;
    if record.is_empty() {
        return Err(ExportError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let mut headers: Vec<String> = record.iter().map(str::to_string).collect();
    if let Some(first) = headers.first_mut()
        && first.starts_with('\u{feff}')
    {
        first.remove(0);
    }
    Ok(headers)
}

fn read_records<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<CsvTable, ExportError> {
    let headers = header_row(&mut reader, path)?;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| ExportError::CsvRead {
            path: PathBuf::from(path),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read CSV"
    );
    Ok(CsvTable { headers, rows })
}
