use std::time::Duration;

use async_trait::async_trait;
use exam_core::model::Question;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::csv_file::read_grid;
use crate::mapping::map_grid;
use crate::repository::{QuestionRepository, StorageError};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/";
pub const DEFAULT_EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d/";
pub const DEFAULT_RANGE: &str = "Sheet1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// How requests to the spreadsheet are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum SheetsAccess {
    /// Sheets API v4 with an API key (sheet must be readable by link).
    ApiKey(String),
    /// Sheets API v4 with an OAuth access token, e.g. minted for a service account.
    BearerToken(String),
    /// Unauthenticated CSV export of a published sheet.
    PublicCsv,
}

impl std::fmt::Debug for SheetsAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsAccess::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            SheetsAccess::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
            SheetsAccess::PublicCsv => f.write_str("PublicCsv"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// A1 range for the values API, usually just the tab name.
    pub range: String,
    /// Tab id for CSV export. The first tab when `None`.
    pub gid: Option<String>,
    pub access: SheetsAccess,
    pub api_base: String,
    pub export_base: String,
}

impl SheetsConfig {
    #[must_use]
    pub fn new(spreadsheet_id: impl Into<String>, access: SheetsAccess) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: DEFAULT_RANGE.to_string(),
            gid: None,
            access,
            api_base: DEFAULT_API_BASE.to_string(),
            export_base: DEFAULT_EXPORT_BASE.to_string(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    #[must_use]
    pub fn with_gid(mut self, gid: Option<String>) -> Self {
        self.gid = gid;
        self
    }

    /// Build the request URL for this configuration.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Config` if the id is blank or a base URL is invalid.
    pub fn request_url(&self) -> Result<Url, StorageError> {
        let id = self.spreadsheet_id.trim();
        if id.is_empty() {
            return Err(StorageError::Config("spreadsheet id is empty".into()));
        }

        match &self.access {
            SheetsAccess::ApiKey(_) | SheetsAccess::BearerToken(_) => {
                let mut url = parse_base(&self.api_base)?;
                url.path_segments_mut()
                    .map_err(|()| StorageError::Config("api base cannot be a base url".into()))?
                    .pop_if_empty()
                    .extend(["spreadsheets", id, "values", self.range.as_str()]);
                url.query_pairs_mut().append_pair("majorDimension", "ROWS");
                if let SheetsAccess::ApiKey(key) = &self.access {
                    url.query_pairs_mut().append_pair("key", key);
                }
                Ok(url)
            }
            SheetsAccess::PublicCsv => {
                let mut url = parse_base(&self.export_base)?;
                url.path_segments_mut()
                    .map_err(|()| StorageError::Config("export base cannot be a base url".into()))?
                    .pop_if_empty()
                    .extend([id, "export"]);
                url.query_pairs_mut().append_pair("format", "csv");
                if let Some(gid) = &self.gid {
                    url.query_pairs_mut().append_pair("gid", gid);
                }
                Ok(url)
            }
        }
    }
}

fn parse_base(raw: &str) -> Result<Url, StorageError> {
    Url::parse(raw).map_err(|err| StorageError::Config(format!("invalid base url {raw}: {err}")))
}

/// Body of `GET spreadsheets/{id}/values/{range}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Question source backed by a Google spreadsheet.
#[derive(Clone)]
pub struct SheetsRepository {
    client: Client,
    config: SheetsConfig,
    url: Url,
}

impl SheetsRepository {
    /// # Errors
    ///
    /// Returns `StorageError::Config` for an unusable configuration.
    pub fn new(config: SheetsConfig) -> Result<Self, StorageError> {
        let url = config.request_url()?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| StorageError::Config(err.to_string()))?;
        Ok(Self {
            client,
            config,
            url,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    fn request(&self) -> RequestBuilder {
        let request = self.client.get(self.url.clone());
        match &self.config.access {
            SheetsAccess::BearerToken(token) => request.bearer_auth(token),
            SheetsAccess::ApiKey(_) | SheetsAccess::PublicCsv => request,
        }
    }

    async fn fetch_grid(&self) -> Result<Vec<Vec<String>>, StorageError> {
        let response = self.request().send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, spreadsheet = %self.config.spreadsheet_id, "sheet request rejected");
            return Err(StorageError::Http { status });
        }

        match self.config.access {
            SheetsAccess::PublicCsv => {
                let text = response.text().await?;
                read_grid(&text)
            }
            SheetsAccess::ApiKey(_) | SheetsAccess::BearerToken(_) => {
                let body: ValueRange = response.json().await?;
                Ok(body
                    .values
                    .into_iter()
                    .map(|row| row.into_iter().map(cell_text).collect())
                    .collect())
            }
        }
    }
}

#[async_trait]
impl QuestionRepository for SheetsRepository {
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        debug!(
            spreadsheet = %self.config.spreadsheet_id,
            access = ?self.config.access,
            "fetching sheet"
        );
        let grid = self.fetch_grid().await?;
        let questions = map_grid(&grid)?;
        info!(
            spreadsheet = %self.config.spreadsheet_id,
            rows = grid.len(),
            count = questions.len(),
            "loaded questions"
        );
        Ok(questions)
    }

    fn describe(&self) -> String {
        match self.config.access {
            SheetsAccess::PublicCsv => format!("Google Sheet {}", self.config.spreadsheet_id),
            _ => format!(
                "Google Sheet {} ({})",
                self.config.spreadsheet_id, self.config.range
            ),
        }
    }
}
