use anyhow::{Context, Result};
use comfy_table::{CellAlignment, Table};
use tracing::{debug, info, info_span};

use xmlprep_cli::config::resolve_prepare_options;
use xmlprep_cli::export::XmlOptions;
use xmlprep_cli::input::read_csv_headers;
use xmlprep_cli::pipeline::{ConvertOutcome, ConvertRequest, convert, write_summary_json};
use xmlprep_core::{
    DuplicateLog, DuplicateSink, TracingSink, match_datetime, prepare_columns_with, sanitize_tag,
};

use crate::cli::{ConvertArgs, HeadersArgs};
use crate::summary::{align_column, apply_table_style, changed_cell, dim_cell, header_cell};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertOutcome> {
    let prepare = resolve_prepare_options(args.config.as_deref(), args.steps.into())?;
    let request = ConvertRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        delimiter: args.delimiter,
        prepare,
        xml: XmlOptions {
            root_element: args.root.clone(),
            row_element: args.row.clone(),
            ..XmlOptions::default()
        },
    };
    let outcome = convert(&request).with_context(|| format!("convert {}", args.input.display()))?;
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &outcome)?;
        info!(path = %path.display(), "wrote summary");
    }
    Ok(outcome)
}

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    let span = info_span!("headers", input = %args.input.display());
    let _guard = span.enter();

    let options = resolve_prepare_options(args.config.as_deref(), args.steps.into())?;
    let headers = read_csv_headers(&args.input, args.delimiter)?;
    let mut duplicates = DuplicateLog::new();
    let report = options.report_duplicates;
    let columns = prepare_columns_with(&headers, &options, &mut |header: &str, count: usize| {
        if report {
            TracingSink.duplicate(header, count);
        }
        duplicates.duplicate(header, count);
    });
    debug!(
        columns = columns.len(),
        duplicated = duplicates.len(),
        "prepared headers"
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("Seen"),
        header_cell("Deduplicated"),
        header_cell("Element"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, column) in columns.iter().enumerate() {
        let seen = if options.dedupe_headers {
            duplicates
                .count_for(&column.source)
                .map_or_else(|| dim_cell("1"), |count| changed_cell(&count.to_string(), true))
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            comfy_table::Cell::new(index + 1),
            comfy_table::Cell::new(&column.source),
            seen,
            changed_cell(&column.deduped, column.deduped != column.source),
            changed_cell(&column.tag, column.is_altered()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_dates(values: &[String]) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Normalized"),
        header_cell("Layout"),
    ]);
    apply_table_style(&mut table);
    for value in values {
        match match_datetime(value) {
            Some(found) => {
                table.add_row(vec![
                    comfy_table::Cell::new(value),
                    changed_cell(&found.canonical(), true),
                    comfy_table::Cell::new(found.layout),
                ]);
            }
            None => {
                table.add_row(vec![
                    comfy_table::Cell::new(value),
                    comfy_table::Cell::new(value),
                    dim_cell("-"),
                ]);
            }
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_sanitize(values: &[String]) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Element")]);
    apply_table_style(&mut table);
    for value in values {
        let tag = sanitize_tag(value);
        let cell = if tag.is_empty() {
            dim_cell("(empty)")
        } else {
            changed_cell(&tag, tag != *value)
        };
        table.add_row(vec![comfy_table::Cell::new(value), cell]);
    }
    println!("{table}");
    Ok(())
}
