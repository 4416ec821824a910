//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::SessionError;
use storage::StorageError;

/// Errors emitted by quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("the question source returned no questions")]
    Empty,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no question source configured; set QUIZ_SHEET_ID or QUIZ_CSV_PATH")]
    NoSource,
    #[error("{var} must be set when QUIZ_SOURCE={source_kind}")]
    MissingVar {
        var: &'static str,
        source_kind: &'static str,
    },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
