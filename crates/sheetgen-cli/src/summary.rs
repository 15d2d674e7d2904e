use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheetgen_model::{RunReport, SheetOutcome};

pub fn print_summary(report: &RunReport) {
    println!("Source: {}", report.source);
    if !report.excluded.is_empty() {
        println!("Skipped: {}", report.excluded.join(", "));
    }
    if !report.sheets.is_empty() {
        println!("{}", summary_table(report));
    }
    println!(
        "=== Complete: {}/{} sheets parsed ===",
        report.succeeded(),
        report.total()
    );
    let failures: Vec<_> = report
        .sheets
        .iter()
        .flat_map(|sheet| sheet.failures.iter().map(move |failure| (&sheet.sheet, failure)))
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (sheet, failure) in failures {
            eprintln!("- {sheet} [{}]: {}", failure.kind.label(), failure.message);
        }
    }
}

fn summary_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Columns"),
        header_cell("Records"),
        header_cell("JSON"),
        header_cell("Code"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    let mut total_records = 0usize;
    for sheet in &report.sheets {
        total_records += sheet.records.unwrap_or(0);
        table.add_row(vec![
            Cell::new(&sheet.sheet)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(sheet.columns),
            count_cell(sheet.records),
            output_cell(sheet.outputs.data.as_ref()),
            output_cell(sheet.outputs.record_type.as_ref()),
            status_cell(sheet),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{}/{}", report.succeeded(), report.total()))
            .add_attribute(Attribute::Bold),
    ]);
    table
}

fn status_cell(sheet: &SheetOutcome) -> Cell {
    if sheet.succeeded() {
        return Cell::new("ok").fg(Color::Green);
    }
    let labels: Vec<&str> = sheet
        .failures
        .iter()
        .map(|failure| failure.kind.label())
        .collect();
    Cell::new(labels.join(", "))
        .fg(Color::Red)
        .add_attribute(Attribute::Bold)
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
