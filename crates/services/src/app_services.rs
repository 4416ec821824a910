use std::sync::Arc;

use tracing::info;

use storage::repository::Storage;

use crate::Clock;
use crate::config::{QuestionSource, QuizConfig};
use crate::error::AppServicesError;
use crate::quiz::QuizLoopService;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    title: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services for the configured question source.
    ///
    /// Nothing is fetched here; each session start reads the source.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the source configuration is unusable.
    pub fn from_config(config: &QuizConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = match &config.source {
            QuestionSource::Sheets(sheets) => Storage::sheets(sheets.clone())?,
            QuestionSource::Csv(path) => Storage::csv_file(path.clone()),
        };
        Ok(Self::from_storage(config, &storage, clock))
    }

    /// Build services over an already constructed storage aggregate.
    #[must_use]
    pub fn from_storage(config: &QuizConfig, storage: &Storage, clock: Clock) -> Self {
        let quiz_loop = QuizLoopService::new(clock, Arc::clone(&storage.questions))
            .with_shuffle(config.shuffle)
            .with_limit(config.question_limit);
        info!(
            title = %config.title,
            source = %quiz_loop.source_label(),
            shuffle = config.shuffle,
            "services ready"
        );
        Self {
            title: config.title.clone(),
            quiz_loop: Arc::new(quiz_loop),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
