//! Worksheets backed by a directory of CSV exports.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use sheetgen_model::Worksheet;

use super::WorksheetSource;
use crate::error::{Result, SourceError};

/// Treats each `*.csv` file in a directory as one worksheet named after the
/// file stem.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists CSV files, sorted by file name.
    fn list_csv_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(SourceError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }
        let entries = std::fs::read_dir(&self.dir).map_err(|e| SourceError::DirectoryRead {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|e| SourceError::DirectoryRead {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            // Check for .csv extension (case-insensitive)
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if is_csv {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn find_sheet_file(&self, name: &str) -> Result<PathBuf> {
        self.list_csv_files()?
            .into_iter()
            .find(|path| sheet_name(path).as_deref() == Some(name))
            .ok_or_else(|| SourceError::SheetNotFound {
                name: name.to_string(),
            })
    }
}

fn sheet_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Reads a CSV file as raw rows. Cells are kept verbatim apart from a
/// leading byte-order mark.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    if let Some(first) = rows.first_mut().and_then(|row| row.first_mut())
        && let Some(stripped) = first.strip_prefix('\u{feff}')
    {
        *first = stripped.to_string();
    }
    Ok(rows)
}

impl WorksheetSource for CsvDirectorySource {
    fn describe(&self) -> String {
        format!("csv:{}", self.dir.display())
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        let names = self
            .list_csv_files()?
            .iter()
            .filter_map(|path| sheet_name(path))
            .collect();
        Ok(names)
    }

    fn fetch_sheet(&self, name: &str) -> Result<Worksheet> {
        let path = self.find_sheet_file(name)?;
        let rows = read_csv_rows(&path)?;
        debug!(sheet = %name, path = %path.display(), rows = rows.len(), "read csv worksheet");
        Ok(Worksheet::new(name, rows))
    }
}
