//! Access to spreadsheets as grids of string cells.

mod csv_dir;
mod google;

pub use csv_dir::{CsvDirectorySource, read_csv_rows};
pub use google::{Credentials, GoogleSheetsSource, SHEETS_API_URL};

use sheetgen_model::Worksheet;

use crate::error::Result;

/// A spreadsheet whose worksheets can be listed and read.
///
/// Implementations return cell values exactly as resolved by the backend;
/// no trimming or padding is applied.
pub trait WorksheetSource {
    /// Short description for logs and the run summary.
    fn describe(&self) -> String;

    /// Worksheet names in spreadsheet order.
    fn sheet_names(&self) -> Result<Vec<String>>;

    /// Reads all rows of one worksheet.
    fn fetch_sheet(&self, name: &str) -> Result<Worksheet>;

    /// Reads every worksheet.
    fn list_worksheets(&self) -> Result<Vec<Worksheet>> {
        self.sheet_names()?
            .iter()
            .map(|name| self.fetch_sheet(name))
            .collect()
    }
}
