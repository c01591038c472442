//! Table preparation for XML export.
//!
//! Composes the three routines the way an exporter uses them: headers are
//! deduplicated and then sanitized into element names, and each cell is
//! passed through date normalization on its own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::datetime::normalize_datetime;
use crate::headers::{DuplicateSink, SilentSink, TracingSink, dedupe_headers_with};
use crate::tags::sanitize_tag;

/// Switches for each preparation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Rename duplicate headers (`Name`, `Name_2`, ...).
    pub dedupe_headers: bool,
    /// Log each duplicated header.
    pub report_duplicates: bool,
    /// Strip invalid characters from element names and encode spaces.
    pub sanitize_tags: bool,
    /// Rewrite recognized dates to `YYYY-MM-DD HH:MM:SS`.
    pub normalize_dates: bool,
    /// Trim surrounding whitespace from cell values.
    pub trim_values: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            dedupe_headers: true,
            report_duplicates: true,
            sanitize_tags: true,
            normalize_dates: true,
            trim_values: false,
        }
    }
}

/// A column header before and after preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnName {
    /// Header text as read from the source.
    pub source: String,
    /// Header after duplicate renaming.
    pub deduped: String,
    /// Element name used in the export.
    pub tag: String,
}

impl ColumnName {
    /// True when sanitizing or the fallback changed the deduplicated header.
    pub fn is_altered(&self) -> bool {
        self.deduped != self.tag
    }
}

/// Counters collected while preparing a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepareStats {
    pub columns: usize,
    pub rows: usize,
    /// Headers renamed by deduplication.
    pub renamed_headers: usize,
    /// Element names that differ from their deduplicated header.
    pub altered_tags: usize,
    /// Element names replaced by the positional fallback.
    pub fallback_tags: usize,
    /// Cells rewritten by date normalization.
    pub normalized_dates: usize,
    /// Rows shorter than the header row.
    pub padded_rows: usize,
    /// Rows with more cells than headers.
    pub truncated_rows: usize,
}

/// Prepared column names and cell values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedTable {
    pub columns: Vec<ColumnName>,
    pub rows: Vec<Vec<String>>,
}

impl PreparedTable {
    /// Element names in column order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.tag.as_str())
    }
}

/// Positional element name for a column whose sanitized name is empty.
///
/// Columns that need a fallback get `column_<n>`, with a count suffix
/// added when another column already uses that name.
pub fn fallback_tag(index: usize) -> String {
    format!("column_{}", index + 1)
}

/// Prepares column names: dedupe, then sanitize.
pub fn prepare_columns<S: AsRef<str>>(
    headers: &[S],
    options: &PrepareOptions,
) -> Vec<ColumnName> {
    prepare_columns_counted(headers, options, &mut PrepareStats::default())
}

/// Prepares column names, reporting duplicate headers to `sink`.
///
/// `sink` replaces the `report_duplicates` switch; it hears nothing when
/// deduplication is disabled.
pub fn prepare_columns_with<S, K>(
    headers: &[S],
    options: &PrepareOptions,
    sink: &mut K,
) -> Vec<ColumnName>
where
    S: AsRef<str>,
    K: DuplicateSink + ?Sized,
{
    build_columns(headers, options, sink, &mut PrepareStats::default())
}

fn prepare_columns_counted<S: AsRef<str>>(
    headers: &[S],
    options: &PrepareOptions,
    stats: &mut PrepareStats,
) -> Vec<ColumnName> {
    if options.report_duplicates {
        build_columns(headers, options, &mut TracingSink, stats)
    } else {
        build_columns(headers, options, &mut SilentSink, stats)
    }
}

fn build_columns<S, K>(
    headers: &[S],
    options: &PrepareOptions,
    sink: &mut K,
    stats: &mut PrepareStats,
) -> Vec<ColumnName>
where
    S: AsRef<str>,
    K: DuplicateSink + ?Sized,
{
    let deduped = if options.dedupe_headers {
        dedupe_headers_with(headers, sink)
    } else {
        headers.iter().map(|h| h.as_ref().to_string()).collect()
    };

    let mut columns: Vec<ColumnName> = headers
        .iter()
        .zip(deduped)
        .map(|(source, deduped)| {
            let tag = if options.sanitize_tags {
                sanitize_tag(&deduped)
            } else {
                deduped.clone()
            };
            ColumnName {
                source: source.as_ref().to_string(),
                deduped,
                tag,
            }
        })
        .collect();

    let mut taken: HashSet<String> = columns
        .iter()
        .filter(|column| !column.tag.is_empty())
        .map(|column| column.tag.clone())
        .collect();
    for (index, column) in columns.iter_mut().enumerate() {
        if column.source != column.deduped {
            stats.renamed_headers += 1;
        }
        if column.tag.is_empty() {
            column.tag = unused_fallback(index, &mut taken);
            stats.fallback_tags += 1;
            debug!(
                column = index + 1,
                header = %column.source,
                tag = %column.tag,
                "empty element name, using fallback"
            );
        }
        if column.is_altered() {
            stats.altered_tags += 1;
        }
    }
    stats.columns = columns.len();
    columns
}

fn unused_fallback(index: usize, taken: &mut HashSet<String>) -> String {
    let base = fallback_tag(index);
    let mut tag = base.clone();
    let mut count = 1;
    while taken.contains(&tag) {
        count += 1;
        tag = format!("{base}_{count}");
    }
    taken.insert(tag.clone());
    tag
}

/// Prepares a single cell value.
pub fn prepare_value(value: &str, options: &PrepareOptions) -> String {
    let value = trimmed(value, options);
    if options.normalize_dates {
        normalize_datetime(value)
    } else {
        value.to_string()
    }
}

fn trimmed<'a>(value: &'a str, options: &PrepareOptions) -> &'a str {
    if options.trim_values {
        value.trim()
    } else {
        value
    }
}

/// Prepares a whole table.
pub fn prepare_table<S, I>(headers: &[S], rows: I, options: &PrepareOptions) -> PreparedTable
where
    S: AsRef<str>,
    I: IntoIterator<Item = Vec<String>>,
{
    prepare_table_with_stats(headers, rows, options).0
}

/// Prepares a whole table and returns the collected counters.
///
/// Short rows are padded with empty cells. Cells beyond the header width
/// have no element name and are dropped.
pub fn prepare_table_with_stats<S, I>(
    headers: &[S],
    rows: I,
    options: &PrepareOptions,
) -> (PreparedTable, PrepareStats)
where
    S: AsRef<str>,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut stats = PrepareStats::default();
    let columns = prepare_columns_counted(headers, options, &mut stats);
    let width = columns.len();

    let mut prepared_rows = Vec::new();
    for (row_index, row) in rows.into_iter().enumerate() {
        if row.len() < width {
            stats.padded_rows += 1;
        } else if row.len() > width {
            stats.truncated_rows += 1;
            debug!(
                row = row_index + 1,
                cells = row.len(),
                columns = width,
                "row has more cells than headers"
            );
        }
        let mut prepared = Vec::with_capacity(width);
        for cell in row.iter().take(width) {
            let value = prepare_value(cell, options);
            if options.normalize_dates && value != trimmed(cell, options) {
                stats.normalized_dates += 1;
            }
            prepared.push(value);
        }
        prepared.resize(width, String::new());
        prepared_rows.push(prepared);
    }
    stats.rows = prepared_rows.len();

    (
        PreparedTable {
            columns,
            rows: prepared_rows,
        },
        stats,
    )
}
