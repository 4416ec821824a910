use async_trait::async_trait;
use exam_core::model::{Question, QuestionError};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::csv_file::CsvRepository;
use crate::sheets::{SheetsConfig, SheetsRepository};

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("question source responded with status {status}")]
    Http { status: reqwest::StatusCode },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("sheet layout error: {0}")]
    Schema(String),

    #[error("invalid question in row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: QuestionError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StorageError::Serialization(err.to_string())
        } else {
            StorageError::Connection(err.to_string())
        }
    }
}

impl From<csv::Error> for StorageError {
    fn from(err: csv::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Source of the ordered question list for a session.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every question, in sheet order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport, authorization or layout failures.
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Short human-readable description of where questions come from.
    fn describe(&self) -> String;
}

/// Fixed question list held in memory, for tests and demos.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }

    /// Replace the stored list. Later fetches see the new questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn set_questions(&self, questions: Vec<Question>) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = questions;
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    fn describe(&self) -> String {
        "built-in question set".to_string()
    }
}

/// Holds the configured question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::with_questions(questions)),
        }
    }

    #[must_use]
    pub fn csv_file(path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Arc::new(CsvRepository::new(path)),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Config` if the sheet configuration is unusable.
    pub fn sheets(config: SheetsConfig) -> Result<Self, StorageError> {
        Ok(Self {
            questions: Arc::new(SheetsRepository::new(config)?),
        })
    }
}
