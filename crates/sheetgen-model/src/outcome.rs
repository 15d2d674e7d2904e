use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stage at which a sheet failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Rows could not be read from the source.
    Fetch,
    MalformedSheet,
    Coercion,
    Write,
}

impl FailureKind {
    pub const fn label(&self) -> &'static str {
        match self {
            FailureKind::Fetch => "fetch",
            FailureKind::MalformedSheet => "malformed",
            FailureKind::Coercion => "coercion",
            FailureKind::Write => "write",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub data: Option<PathBuf>,
    pub record_type: Option<PathBuf>,
    pub container_type: Option<PathBuf>,
}

/// Result of processing one worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetOutcome {
    pub sheet: String,
    /// Number of keyed columns, when the schema was extracted.
    pub columns: Option<usize>,
    /// Number of assembled records, when assembly succeeded.
    pub records: Option<usize>,
    pub outputs: OutputPaths,
    pub failures: Vec<SheetFailure>,
}

impl SheetOutcome {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            columns: None,
            records: None,
            outputs: OutputPaths::default(),
            failures: Vec::new(),
        }
    }

    pub fn fail(&mut self, kind: FailureKind, message: impl Into<String>) {
        self.failures.push(SheetFailure {
            kind,
            message: message.into(),
        });
    }

    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_failure(&self, kind: FailureKind) -> bool {
        self.failures.iter().any(|failure| failure.kind == kind)
    }
}

/// Aggregated outcome of one run over a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Human-readable description of the worksheet source.
    pub source: String,
    pub sheets: Vec<SheetOutcome>,
    /// Worksheet names excluded by the reserved-prefix convention.
    pub excluded: Vec<String>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.sheets.len()
    }

    pub fn succeeded(&self) -> usize {
        self.sheets.iter().filter(|sheet| sheet.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// A run is successful when at least one sheet succeeded.
    pub fn is_success(&self) -> bool {
        self.succeeded() > 0
    }
}
