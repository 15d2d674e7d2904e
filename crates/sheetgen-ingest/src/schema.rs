//! Column schema extraction from the three header rows.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use sheetgen_model::{ColumnSchema, HEADER_ROWS, ListSyntax, SheetError, SheetSchema, TypeTag};

const DESCRIPTION_ROW: usize = 0;
const TYPE_ROW: usize = 1;
const KEY_ROW: usize = 2;

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Builds the ordered column schema of a worksheet.
///
/// Row 0 holds descriptions, row 1 type tokens, row 2 keys. The schema is as
/// wide as the widest header row so that every column keeps its position.
/// Unknown type tokens resolve to `string`.
pub fn extract_schema(rows: &[Vec<String>]) -> Result<SheetSchema, SheetError> {
    if rows.len() < HEADER_ROWS {
        return Err(SheetError::MalformedSheet { found: rows.len() });
    }
    let descriptions = &rows[DESCRIPTION_ROW];
    let types = &rows[TYPE_ROW];
    let keys = &rows[KEY_ROW];
    let width = descriptions.len().max(types.len()).max(keys.len());

    let mut columns = Vec::with_capacity(width);
    let mut seen_keys = BTreeSet::new();
    for index in 0..width {
        let key = cell(keys, index).to_string();
        let raw_type = cell(types, index).to_string();
        let (type_tag, list_syntax) = match TypeTag::from_token(&raw_type) {
            Some(resolved) => resolved,
            None => {
                if !key.is_empty() {
                    debug!(
                        column = index,
                        key = %key,
                        type_token = %raw_type,
                        "unrecognized type token, treating as string"
                    );
                }
                (TypeTag::String, ListSyntax::Generic)
            }
        };
        if !key.is_empty() && !seen_keys.insert(key.clone()) {
            warn!(column = index, key = %key, "duplicate column key");
        }
        columns.push(ColumnSchema {
            index,
            key,
            type_tag,
            list_syntax,
            description: cell(descriptions, index).to_string(),
            raw_type,
        });
    }

    Ok(SheetSchema {
        columns,
        data_start: HEADER_ROWS,
    })
}
