//! Per-sheet error types.

use thiserror::Error;

use crate::schema::{HEADER_ROWS, TypeTag};

/// A raw cell could not be converted to its declared numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read '{value}' as {type_tag}: {reason}")]
pub struct CoercionError {
    pub value: String,
    pub type_tag: TypeTag,
    pub reason: String,
}

/// Errors local to one worksheet. None of them abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Fewer than the three header rows were present.
    #[error("malformed sheet: expected at least {} header rows, found {found}", HEADER_ROWS)]
    MalformedSheet { found: usize },

    /// A data cell failed coercion. `row` is the 1-based sheet row.
    #[error("row {row}, column '{key}': {source}")]
    Cell {
        row: usize,
        column: usize,
        key: String,
        #[source]
        source: CoercionError,
    },
}

pub type Result<T> = std::result::Result<T, SheetError>;
