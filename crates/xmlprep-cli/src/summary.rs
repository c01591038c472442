use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xmlprep_cli::pipeline::ConvertOutcome;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

/// Highlights values that differ from their source.
pub fn changed_cell(value: &str, changed: bool) -> Cell {
    if changed {
        Cell::new(value).fg(Color::Yellow)
    } else {
        Cell::new(value)
    }
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_convert_summary(outcome: &ConvertOutcome) {
    eprintln!("Input: {}", outcome.input.display());
    if let Some(path) = &outcome.output {
        eprintln!("Output: {}", path.display());
    }

    let stats = &outcome.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Columns", stats.columns),
        ("Records written", outcome.records_written),
        ("Headers renamed", stats.renamed_headers),
        ("Element names changed", stats.altered_tags),
        ("Fallback element names", stats.fallback_tags),
        ("Dates normalized", stats.normalized_dates),
        ("Short rows padded", stats.padded_rows),
        ("Long rows truncated", stats.truncated_rows),
    ];
    for (label, count) in rows {
        let count_cell = if count == 0 {
            dim_cell("0")
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(label), count_cell]);
    }
    eprintln!("{table}");
}
