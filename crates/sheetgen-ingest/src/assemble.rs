//! Record assembly from data rows.

use tracing::{debug, trace};

use sheetgen_model::{ColumnSchema, Record, SheetError, SheetSchema};

use crate::coerce::coerce;

/// Marker for a disabled data row when it starts the first cell.
const COMMENT_PREFIX: char = '#';

/// Returns true for rows that produce no record: rows with no non-empty cell
/// and rows whose first cell starts with `#`.
pub fn is_skipped_row(row: &[String]) -> bool {
    match row.first() {
        None => true,
        Some(first) if first.starts_with(COMMENT_PREFIX) => true,
        Some(_) => row.iter().all(String::is_empty),
    }
}

/// Coerces every retained data row into a record, in row order.
///
/// Cells missing from short rows read as empty. The first coercion failure
/// aborts the whole sheet.
pub fn assemble_records(
    rows: &[Vec<String>],
    schema: &SheetSchema,
) -> Result<Vec<Record>, SheetError> {
    let keyed: Vec<&ColumnSchema> = schema.keyed_columns().collect();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in rows.iter().enumerate().skip(schema.data_start) {
        let sheet_row = index + 1;
        if is_skipped_row(row) {
            trace!(row = sheet_row, "skipping blank or commented row");
            skipped += 1;
            continue;
        }
        let mut record = Record::with_capacity(keyed.len());
        for column in &keyed {
            let raw = row.get(column.index).map(String::as_str).unwrap_or("");
            let value = coerce(raw, column.type_tag).map_err(|source| SheetError::Cell {
                row: sheet_row,
                column: column.index,
                key: column.key.clone(),
                source,
            })?;
            record.insert(column.key.clone(), value);
        }
        records.push(record);
    }

    debug!(records = records.len(), skipped, "assembled records");
    Ok(records)
}
