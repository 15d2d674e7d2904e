//! CLI argument definitions for `sheetgen`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use sheetgen_cli::config::{DEFAULT_CODE_DIR, DEFAULT_JSON_DIR};

#[derive(Parser)]
#[command(
    name = "sheetgen",
    version,
    about = "Sync spreadsheet worksheets into JSON data files and Unity C# types",
    long_about = "Read every worksheet of a spreadsheet, treat its first three rows as \
                  description, type, and key headers, and write one JSON data file plus \
                  generated C# record and ScriptableObject types per sheet.\n\n\
                  Worksheets whose names start with '!', '@', or '#' are skipped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in logs and error messages.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch worksheets and write JSON data and generated C# types.
    Sync(SyncArgs),

    /// Print the column schema extracted from a CSV export of one sheet.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct SyncArgs {
    /// Spreadsheet to read.
    #[arg(long = "spreadsheet-id", env = "SPREADSHEET_ID", value_name = "ID")]
    pub spreadsheet_id: Option<String>,

    /// OAuth 2.0 access token for the Sheets API.
    #[arg(
        long = "access-token",
        env = "GOOGLE_ACCESS_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true
    )]
    pub access_token: Option<String>,

    /// API key; only works for publicly readable spreadsheets.
    #[arg(
        long = "api-key",
        env = "GOOGLE_API_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Read worksheets from a directory of CSV exports instead.
    #[arg(long = "csv-dir", env = "SHEETGEN_CSV_DIR", value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,

    /// Directory for JSON data files.
    #[arg(
        long = "json-dir",
        env = "SHEETGEN_JSON_DIR",
        value_name = "DIR",
        default_value = DEFAULT_JSON_DIR
    )]
    pub json_dir: PathBuf,

    /// Directory for generated C# sources.
    #[arg(
        long = "code-dir",
        env = "SHEETGEN_CODE_DIR",
        value_name = "DIR",
        default_value = DEFAULT_CODE_DIR
    )]
    pub code_dir: PathBuf,

    /// Wrap generated types in this namespace.
    #[arg(long = "namespace", env = "SHEETGEN_NAMESPACE", value_name = "NAME")]
    pub namespace: Option<String>,

    /// Suffix appended to the sheet name for the container type.
    #[arg(long = "container-suffix", value_name = "SUFFIX", default_value = "SO")]
    pub container_suffix: String,

    /// Root of the CreateAssetMenu menu path.
    #[arg(long = "menu-root", value_name = "PATH", default_value = "Data")]
    pub menu_root: String,

    /// Skip JSON data files.
    #[arg(long = "no-json")]
    pub no_json: bool,

    /// Skip generated C# types.
    #[arg(long = "no-code")]
    pub no_code: bool,

    /// Parse and generate without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write the run report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// CSV export of a single worksheet.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
