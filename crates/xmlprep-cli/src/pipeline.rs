//! CSV to XML conversion.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use xmlprep_core::{ColumnName, PrepareOptions, PrepareStats, prepare_table_with_stats};

use crate::error::ExportError;
use crate::export::{XmlOptions, write_xml};
use crate::input::{CsvTable, read_csv_table};

/// Everything needed to convert one CSV file.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Destination file; stdout when `None`.
    pub output: Option<PathBuf>,
    pub delimiter: u8,
    pub prepare: PrepareOptions,
    pub xml: XmlOptions,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            delimiter: b',',
            prepare: PrepareOptions::default(),
            xml: XmlOptions::default(),
        }
    }
}

/// Result of a conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub columns: Vec<ColumnName>,
    pub stats: PrepareStats,
    pub records_written: usize,
}

/// Reads, prepares, and writes one CSV file.
pub fn convert(request: &ConvertRequest) -> Result<ConvertOutcome> {
    let span = info_span!("convert", input = %request.input.display());
    let _guard = span.enter();

    let source = read_csv_table(&request.input, request.delimiter)?;
    info!(
        columns = source.headers.len(),
        rows = source.rows.len(),
        "loaded input"
    );

    let (columns, stats, records_written) = match &request.output {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = File::create(path).map_err(|source| ExportError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let result = convert_table(source, BufWriter::new(file), request)?;
            info!(output = %path.display(), records = result.2, "wrote XML");
            result
        }
        None => {
            let stdout = io::stdout();
            convert_table(source, BufWriter::new(stdout.lock()), request)?
        }
    };

    Ok(ConvertOutcome {
        input: request.input.clone(),
        output: request.output.clone(),
        columns,
        stats,
        records_written,
    })
}

/// Prepares an in-memory table and writes it to `writer`.
pub fn convert_table<W: Write>(
    source: CsvTable,
    writer: W,
    request: &ConvertRequest,
) -> Result<(Vec<ColumnName>, PrepareStats, usize), ExportError> {
    let (table, stats) = prepare_table_with_stats(&source.headers, source.rows, &request.prepare);
    let written = write_xml(writer, &table, &request.xml)?;
    Ok((table.columns, stats, written))
}

/// Writes the outcome as pretty-printed JSON.
pub fn write_summary_json(path: &Path, outcome: &ConvertOutcome) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, outcome)
        .with_context(|| format!("write {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}
