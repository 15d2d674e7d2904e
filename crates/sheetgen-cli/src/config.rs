//! Validated run configuration.

use std::path::PathBuf;

use thiserror::Error;

use sheetgen_ingest::Credentials;
use sheetgen_output::CodegenOptions;

/// Default directory for JSON data files, relative to the Unity project.
pub const DEFAULT_JSON_DIR: &str = "Assets/_Project/Resources/Data/JSON";
/// Default directory for generated C# sources, relative to the Unity project.
pub const DEFAULT_CODE_DIR: &str = "Assets/_Project/1_Scripts/Data/Generated";

/// A required configuration value is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "no spreadsheet id: set SPREADSHEET_ID or pass --spreadsheet-id (or use --csv-dir)"
    )]
    MissingSpreadsheetId,

    #[error(
        "no credentials: set GOOGLE_ACCESS_TOKEN or GOOGLE_API_KEY, or use --access-token/--api-key"
    )]
    MissingCredentials,
}

/// Raw source settings as collected from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct SourceSettings {
    pub spreadsheet_id: Option<String>,
    pub access_token: Option<String>,
    pub api_key: Option<String>,
    pub csv_dir: Option<PathBuf>,
}

/// Where worksheets are read from.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Google {
        spreadsheet_id: String,
        credentials: Credentials,
    },
    CsvDir(PathBuf),
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl SourceConfig {
    /// Resolves the source. A CSV directory takes precedence over the
    /// spreadsheet; an access token takes precedence over an API key. Blank
    /// values count as absent.
    pub fn resolve(settings: &SourceSettings) -> Result<Self, ConfigError> {
        if let Some(dir) = &settings.csv_dir {
            return Ok(SourceConfig::CsvDir(dir.clone()));
        }
        let spreadsheet_id =
            non_empty(settings.spreadsheet_id.as_ref()).ok_or(ConfigError::MissingSpreadsheetId)?;
        let credentials = if let Some(token) = non_empty(settings.access_token.as_ref()) {
            Credentials::AccessToken(token)
        } else if let Some(key) = non_empty(settings.api_key.as_ref()) {
            Credentials::ApiKey(key)
        } else {
            return Err(ConfigError::MissingCredentials);
        };
        Ok(SourceConfig::Google {
            spreadsheet_id,
            credentials,
        })
    }
}

/// Output side of a run.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub json_dir: PathBuf,
    pub code_dir: PathBuf,
    pub codegen: CodegenOptions,
    pub write_json: bool,
    pub write_code: bool,
    /// Parse and generate, but write nothing.
    pub dry_run: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_dir: PathBuf::from(DEFAULT_JSON_DIR),
            code_dir: PathBuf::from(DEFAULT_CODE_DIR),
            codegen: CodegenOptions::default(),
            write_json: true,
            write_code: true,
            dry_run: false,
        }
    }
}

/// Everything a `sync` run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
}
