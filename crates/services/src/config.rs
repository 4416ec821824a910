use std::env;
use std::path::PathBuf;

use storage::sheets::{DEFAULT_RANGE, SheetsAccess, SheetsConfig};

use crate::error::ConfigError;

pub const DEFAULT_TITLE: &str = "Practice Exam";

pub const VAR_TITLE: &str = "QUIZ_TITLE";
pub const VAR_SOURCE: &str = "QUIZ_SOURCE";
pub const VAR_SHEET_ID: &str = "QUIZ_SHEET_ID";
pub const VAR_SHEET_RANGE: &str = "QUIZ_SHEET_RANGE";
pub const VAR_SHEET_GID: &str = "QUIZ_SHEET_GID";
pub const VAR_API_KEY: &str = "QUIZ_SHEETS_API_KEY";
pub const VAR_ACCESS_TOKEN: &str = "QUIZ_SHEETS_ACCESS_TOKEN";
pub const VAR_CSV_PATH: &str = "QUIZ_CSV_PATH";
pub const VAR_SHUFFLE: &str = "QUIZ_SHUFFLE";
pub const VAR_QUESTION_LIMIT: &str = "QUIZ_QUESTION_LIMIT";

/// Where the question list is read from.
#[derive(Debug, Clone)]
pub enum QuestionSource {
    Sheets(SheetsConfig),
    Csv(PathBuf),
}

/// Runtime configuration for the quiz app.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub title: String,
    pub source: QuestionSource,
    pub shuffle: bool,
    pub question_limit: Option<usize>,
}

impl QuizConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no source is configured or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    ///
    /// `QUIZ_SOURCE` picks the backend explicitly. Without it a CSV path wins
    /// over a sheet id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no source is configured or a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let source = match get(VAR_SOURCE).map(|kind| kind.to_ascii_lowercase()) {
            Some(kind) if kind == "csv" => {
                let path = get(VAR_CSV_PATH).ok_or(ConfigError::MissingVar {
                    var: VAR_CSV_PATH,
                    source_kind: "csv",
                })?;
                QuestionSource::Csv(PathBuf::from(path))
            }
            Some(kind) if kind == "sheets" => {
                let id = get(VAR_SHEET_ID).ok_or(ConfigError::MissingVar {
                    var: VAR_SHEET_ID,
                    source_kind: "sheets",
                })?;
                QuestionSource::Sheets(sheets_config(id, &get))
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: VAR_SOURCE,
                    value: other,
                });
            }
            None => match (get(VAR_CSV_PATH), get(VAR_SHEET_ID)) {
                (Some(path), _) => QuestionSource::Csv(PathBuf::from(path)),
                (None, Some(id)) => QuestionSource::Sheets(sheets_config(id, &get)),
                (None, None) => return Err(ConfigError::NoSource),
            },
        };

        let shuffle = match get(VAR_SHUFFLE) {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                var: VAR_SHUFFLE,
                value: raw,
            })?,
        };

        let question_limit = match get(VAR_QUESTION_LIMIT) {
            None => None,
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => None,
                Ok(limit) => Some(limit),
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        var: VAR_QUESTION_LIMIT,
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            title: get(VAR_TITLE).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            source,
            shuffle,
            question_limit,
        })
    }
}

fn sheets_config(id: String, get: &impl Fn(&str) -> Option<String>) -> SheetsConfig {
    // A token takes precedence over a key when both are present.
    let access = match (get(VAR_ACCESS_TOKEN), get(VAR_API_KEY)) {
        (Some(token), _) => SheetsAccess::BearerToken(token),
        (None, Some(key)) => SheetsAccess::ApiKey(key),
        (None, None) => SheetsAccess::PublicCsv,
    };
    SheetsConfig::new(id, access)
        .with_range(get(VAR_SHEET_RANGE).unwrap_or_else(|| DEFAULT_RANGE.to_string()))
        .with_gid(get(VAR_SHEET_GID))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
