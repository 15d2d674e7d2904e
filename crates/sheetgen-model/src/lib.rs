pub mod error;
pub mod outcome;
pub mod schema;
pub mod value;
pub mod worksheet;

pub use error::{CoercionError, Result, SheetError};
pub use outcome::{FailureKind, OutputPaths, RunReport, SheetFailure, SheetOutcome};
pub use schema::{ColumnSchema, HEADER_ROWS, ListSyntax, SheetSchema, TypeTag};
pub use value::{Record, TypedValue};
pub use worksheet::Worksheet;
