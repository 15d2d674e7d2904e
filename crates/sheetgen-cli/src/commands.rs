use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info;

use sheetgen_cli::config::{OutputConfig, SourceConfig, SourceSettings, SyncConfig};
use sheetgen_cli::pipeline::run_sync;
use sheetgen_ingest::{
    CsvDirectorySource, GoogleSheetsSource, WorksheetSource, extract_schema, read_csv_rows,
};
use sheetgen_model::RunReport;
use sheetgen_output::{CodegenOptions, write_text};

use crate::cli::{SchemaArgs, SyncArgs};
use crate::summary::apply_table_style;

pub fn sync_config_from_args(args: &SyncArgs) -> Result<SyncConfig> {
    let settings = SourceSettings {
        spreadsheet_id: args.spreadsheet_id.clone(),
        access_token: args.access_token.clone(),
        api_key: args.api_key.clone(),
        csv_dir: args.csv_dir.clone(),
    };
    let source = SourceConfig::resolve(&settings)?;
    let output = OutputConfig {
        json_dir: args.json_dir.clone(),
        code_dir: args.code_dir.clone(),
        codegen: CodegenOptions {
            namespace: args.namespace.clone(),
            container_suffix: args.container_suffix.clone(),
            menu_root: args.menu_root.clone(),
        },
        write_json: !args.no_json,
        write_code: !args.no_code,
        dry_run: args.dry_run,
    };
    Ok(SyncConfig { source, output })
}

fn build_source(config: &SourceConfig) -> Result<Box<dyn WorksheetSource>> {
    match config {
        SourceConfig::Google {
            spreadsheet_id,
            credentials,
        } => {
            let source = GoogleSheetsSource::new(spreadsheet_id.as_str(), credentials.clone())
                .context("create Sheets API client")?;
            Ok(Box::new(source))
        }
        SourceConfig::CsvDir(dir) => Ok(Box::new(CsvDirectorySource::new(dir.clone()))),
    }
}

pub fn run_sync_command(args: &SyncArgs) -> Result<RunReport> {
    let config = sync_config_from_args(args)?;
    let source = build_source(&config.source)?;
    let report = run_sync(source.as_ref(), &config.output)?;
    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("serialize run report")?;
        write_text(path, &json).context("write run report")?;
        info!(path = %path.display(), "wrote run report");
    }
    Ok(report)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let rows = read_csv_rows(&args.csv_file)?;
    let schema = extract_schema(&rows)
        .with_context(|| format!("read schema of {}", args.csv_file.display()))?;
    let mut table = Table::new();
    table.set_header(vec!["#", "Key", "Type", "Declared", "Description"]);
    apply_table_style(&mut table);
    for column in &schema.columns {
        let key = if column.is_keyed() {
            Cell::new(&column.key)
        } else {
            Cell::new("(ignored)")
        };
        let declared = if column.is_fallback_type() {
            format!("{} (as string)", column.raw_type)
        } else {
            column.raw_type.clone()
        };
        table.add_row(vec![
            Cell::new(column.index),
            key,
            Cell::new(column.type_tag),
            Cell::new(declared),
            Cell::new(&column.description),
        ]);
    }
    println!("{table}");
    Ok(())
}
