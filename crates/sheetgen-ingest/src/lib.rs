pub mod assemble;
pub mod coerce;
pub mod error;
pub mod schema;
pub mod select;
pub mod source;

pub use assemble::{assemble_records, is_skipped_row};
pub use coerce::{NULL_LITERAL, TRUE_LITERALS, coerce};
pub use error::{Result, SourceError};
pub use schema::extract_schema;
pub use select::{
    RESERVED_PREFIXES, is_reserved_sheet_name, partition_sheet_names, select_worksheets,
};
pub use source::{
    Credentials, CsvDirectorySource, GoogleSheetsSource, SHEETS_API_URL, WorksheetSource,
    read_csv_rows,
};
