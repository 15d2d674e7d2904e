//! Sync pipeline: select worksheets, then for each one extract the schema and
//! run the two independent output branches.
//!
//! 1. **JSON**: assemble records, write `<json_dir>/<Sheet>.json`
//! 2. **Code**: generate record and container types, write `<code_dir>/*.cs`
//!
//! Failures inside a sheet are recorded on its [`SheetOutcome`] and never
//! stop the run. Only failing to list the worksheets is run-fatal.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use sheetgen_ingest::{
    SourceError, WorksheetSource, assemble_records, extract_schema, partition_sheet_names,
};
use sheetgen_model::{FailureKind, Record, RunReport, SheetError, SheetOutcome, Worksheet};
use sheetgen_output::{
    data_file_path, generate_type_sources, write_records_json, write_type_sources,
};

use crate::config::OutputConfig;
use crate::logging::redact_value;

/// Errors that end a run before any sheet is processed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Authentication(SourceError),

    #[error(transparent)]
    Enumeration(SourceError),
}

impl From<SourceError> for RunError {
    fn from(error: SourceError) -> Self {
        if error.is_authentication() {
            RunError::Authentication(error)
        } else {
            RunError::Enumeration(error)
        }
    }
}

/// Process every eligible worksheet of `source` in spreadsheet order.
pub fn run_sync(
    source: &dyn WorksheetSource,
    config: &OutputConfig,
) -> Result<RunReport, RunError> {
    let description = source.describe();
    let run_span = info_span!("run", source = %description);
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let names = source.sheet_names()?;
    let (selected, excluded) = partition_sheet_names(names);
    for name in &excluded {
        debug!(sheet = %name, "skipping reserved worksheet");
    }
    info!(
        selected = selected.len(),
        excluded = excluded.len(),
        dry_run = config.dry_run,
        "starting sync"
    );

    let mut sheets = Vec::with_capacity(selected.len());
    for name in &selected {
        let outcome = match source.fetch_sheet(name) {
            Ok(worksheet) => process_sheet(&worksheet, config),
            Err(error) => {
                warn!(sheet = %name, error = %error, "failed to fetch worksheet");
                let mut outcome = SheetOutcome::new(name.as_str());
                outcome.fail(FailureKind::Fetch, error.to_string());
                outcome
            }
        };
        sheets.push(outcome);
    }

    let report = RunReport {
        source: description,
        sheets,
        excluded,
    };
    info!(
        succeeded = report.succeeded(),
        total = report.total(),
        duration_ms = run_start.elapsed().as_millis(),
        "sync complete"
    );
    Ok(report)
}

/// Process one worksheet through both output branches.
pub fn process_sheet(worksheet: &Worksheet, config: &OutputConfig) -> SheetOutcome {
    let sheet_span = info_span!("sheet", sheet = %worksheet.name);
    let _sheet_guard = sheet_span.enter();
    let start = Instant::now();
    let mut outcome = SheetOutcome::new(worksheet.name.as_str());

    let schema = match extract_schema(&worksheet.rows) {
        Ok(schema) => schema,
        Err(error) => {
            warn!(error = %error, "skipping malformed worksheet");
            outcome.fail(FailureKind::MalformedSheet, error.to_string());
            return outcome;
        }
    };
    let keyed = schema.keyed_columns().count();
    outcome.columns = Some(keyed);
    debug!(
        columns = schema.width(),
        keyed,
        rows = worksheet.rows.len(),
        "extracted schema"
    );

    if config.write_json {
        match assemble_records(&worksheet.rows, &schema) {
            Ok(records) => {
                outcome.records = Some(records.len());
                if !write_json_branch(worksheet, &records, config, &mut outcome) {
                    return outcome;
                }
            }
            Err(error) => {
                let message = sheet_error_message(&error);
                warn!(error = %message, "skipping data file");
                outcome.fail(FailureKind::Coercion, message);
            }
        }
    }

    if config.write_code {
        let sources = generate_type_sources(&worksheet.name, &schema.columns, &config.codegen);
        if config.dry_run {
            debug!(
                record_type = %sources.record_type_name,
                container_type = %sources.container_type_name,
                "dry run: generated types not written"
            );
        } else {
            match write_type_sources(&config.code_dir, &sources) {
                Ok((record_path, container_path)) => {
                    outcome.outputs.record_type = Some(record_path);
                    outcome.outputs.container_type = Some(container_path);
                }
                Err(error) => {
                    warn!(error = %error, "failed to write generated types");
                    outcome.fail(FailureKind::Write, error.to_string());
                }
            }
        }
    }

    info!(
        records = outcome.records,
        columns = outcome.columns,
        failures = outcome.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "sheet processed"
    );
    outcome
}

/// Returns false when the write failed and the sheet's remaining outputs must
/// be skipped.
fn write_json_branch(
    worksheet: &Worksheet,
    records: &[Record],
    config: &OutputConfig,
    outcome: &mut SheetOutcome,
) -> bool {
    let path = match data_file_path(&config.json_dir, &worksheet.name) {
        Ok(path) => path,
        Err(error) => {
            warn!(error = %error, "cannot name data file");
            outcome.fail(FailureKind::Write, error.to_string());
            return false;
        }
    };
    if config.dry_run {
        debug!(path = %path.display(), records = records.len(), "dry run: data file not written");
        return true;
    }
    match write_records_json(&path, records) {
        Ok(()) => {
            outcome.outputs.data = Some(path);
            true
        }
        Err(error) => {
            warn!(error = %error, "failed to write data file");
            outcome.fail(FailureKind::Write, error.to_string());
            false
        }
    }
}

/// Error text with the offending cell value redacted unless data logging is on.
fn sheet_error_message(error: &SheetError) -> String {
    match error {
        SheetError::Cell {
            row, key, source, ..
        } => format!(
            "row {row}, column '{key}': cannot read '{}' as {}: {}",
            redact_value(&source.value),
            source.type_tag,
            source.reason
        ),
        SheetError::MalformedSheet { .. } => error.to_string(),
    }
}
