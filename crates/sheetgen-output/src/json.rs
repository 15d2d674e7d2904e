//! JSON data file output.

use std::path::{Path, PathBuf};

use tracing::debug;

use sheetgen_model::Record;

use crate::common::{file_in_dir, write_text};
use crate::error::Result;

/// `<dir>/<sheet>.json`. Sheet names containing path separators are rejected.
pub fn data_file_path(dir: &Path, sheet_name: &str) -> Result<PathBuf> {
    file_in_dir(dir, sheet_name, "json")
}

/// Render records as an indented JSON array.
///
/// Field order and record order are preserved and non-ASCII text is written
/// as-is.
pub fn records_to_json(records: &[Record]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}

/// Write records to `path`, creating intermediate directories.
pub fn write_records_json(path: &Path, records: &[Record]) -> Result<()> {
    let text = records_to_json(records)?;
    write_text(path, &text)?;
    debug!(path = %path.display(), records = records.len(), "wrote json");
    Ok(())
}
