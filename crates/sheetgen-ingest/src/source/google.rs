//! Google Sheets v4 REST client.

use std::fmt;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use sheetgen_model::Worksheet;

use super::WorksheetSource;
use crate::error::{Result, SourceError};

/// Sheets API base URL.
pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("sheetgen/", env!("CARGO_PKG_VERSION"));

/// How requests are authorized.
#[derive(Clone)]
pub enum Credentials {
    /// OAuth 2.0 access token sent as a bearer token.
    AccessToken(String),
    /// API key, only valid for publicly readable spreadsheets.
    ApiKey(String),
}

impl Credentials {
    fn secret(&self) -> &str {
        match self {
            Credentials::AccessToken(token) => token,
            Credentials::ApiKey(key) => key,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::AccessToken(token) => request.bearer_auth(token),
            Credentials::ApiKey(key) => request.query(&[("key", key.as_str())]),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken([REDACTED])"),
            Credentials::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Response of `spreadsheets.values.get`. `values` is omitted for empty
/// sheets and rows drop trailing empty cells.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Failure of a single HTTP exchange.
enum RequestFailure {
    Unauthorized(String),
    Other(String),
}

/// Reads worksheets of one spreadsheet through the Sheets API.
#[derive(Debug, Clone)]
pub struct GoogleSheetsSource {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    credentials: Credentials,
}

impl GoogleSheetsSource {
    /// Creates a client for the given spreadsheet.
    pub fn new(spreadsheet_id: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::with_base_url(spreadsheet_id, credentials, SHEETS_API_URL)
    }

    /// Creates a client against a different API endpoint.
    pub fn with_base_url(
        spreadsheet_id: impl Into<String>,
        credentials: Credentials,
        base_url: &str,
    ) -> Result<Self> {
        if credentials.secret().trim().is_empty() {
            return Err(SourceError::Authentication {
                reason: "empty credential".to_string(),
            });
        }
        let base_url = Url::parse(base_url).map_err(|e| SourceError::Authentication {
            reason: format!("invalid API URL {base_url}: {e}"),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SourceError::Authentication {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `{base}/v4/spreadsheets/{id}/{extra...}` with every segment escaped.
    fn spreadsheet_url(&self, extra: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
                .extend(extra);
        }
        url
    }

    fn values_url(&self, sheet: &str) -> Url {
        self.spreadsheet_url(&["values", &a1_sheet_range(sheet)])
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> std::result::Result<T, RequestFailure> {
        debug!(url = %url, "sheets api request");
        let request = self.credentials.authorize(self.client.get(url).query(query));
        let response = request
            .send()
            .map_err(|e| RequestFailure::Other(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RequestFailure::Unauthorized(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RequestFailure::Other(format!("HTTP {status}: {}", body.trim())));
        }
        response
            .json::<T>()
            .map_err(|e| RequestFailure::Other(format!("invalid response body: {e}")))
    }
}

/// Quotes a sheet title as an A1 range covering the whole sheet.
pub(crate) fn a1_sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl WorksheetSource for GoogleSheetsSource {
    fn describe(&self) -> String {
        let id = &self.spreadsheet_id;
        let shown: String = id.chars().take(10).collect();
        if shown.len() < id.len() {
            format!("google-sheets:{shown}...")
        } else {
            format!("google-sheets:{shown}")
        }
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        let url = self.spreadsheet_url(&[]);
        let metadata: SpreadsheetMetadata = self
            .get_json(url, &[("fields", "sheets.properties.title")])
            .map_err(|failure| match failure {
                RequestFailure::Unauthorized(reason) => SourceError::Authentication { reason },
                RequestFailure::Other(reason) => SourceError::Enumeration { reason },
            })?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    fn fetch_sheet(&self, name: &str) -> Result<Worksheet> {
        let url = self.values_url(name);
        let range: ValueRange = self
            .get_json(
                url,
                &[
                    ("majorDimension", "ROWS"),
                    ("valueRenderOption", "FORMATTED_VALUE"),
                ],
            )
            .map_err(|failure| {
                let reason = match failure {
                    RequestFailure::Unauthorized(reason) | RequestFailure::Other(reason) => reason,
                };
                SourceError::SheetRead {
                    name: name.to_string(),
                    reason,
                }
            })?;
        let rows = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        Ok(Worksheet::new(name, rows))
    }
}
