use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use exam_core::model::{Question, QuizSession};
use storage::repository::QuestionRepository;

use super::service::QuizService;
use crate::Clock;
use crate::error::QuizServiceError;

/// Starts quiz sessions from a question source.
///
/// Each start fetches the question list exactly once; the session then works
/// on that snapshot until it is dropped.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    shuffle: bool,
    limit: Option<usize>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            clock,
            questions,
            shuffle: false,
            limit: None,
        }
    }

    /// Present questions in random order instead of source order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Cap the number of questions per session. `None` or `Some(0)` keeps all.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    #[must_use]
    pub fn source_label(&self) -> String {
        self.questions.describe()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Fetch the question set and open a new session over it.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the fetch fails and
    /// `QuizServiceError::Empty` if it yields no questions.
    pub async fn start_session(&self) -> Result<QuizService, QuizServiceError> {
        let questions = self.load().await?;
        let session = QuizSession::new(questions)?;
        Ok(QuizService::new(session, self.clock))
    }

    /// Fetch and validate the source without starting a session.
    ///
    /// Returns the number of questions a session would receive.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::start_session`].
    pub async fn check_source(&self) -> Result<usize, QuizServiceError> {
        Ok(self.load().await?.len())
    }

    async fn load(&self) -> Result<Vec<Question>, QuizServiceError> {
        let source = self.questions.describe();
        debug!(%source, shuffle = self.shuffle, limit = ?self.limit, "fetching questions");

        let mut questions = self.questions.fetch_questions().await.map_err(|err| {
            warn!(%source, error = %err, "question fetch failed");
            QuizServiceError::Storage(err)
        })?;

        if questions.is_empty() {
            warn!(%source, "question source is empty");
            return Err(QuizServiceError::Empty);
        }

        if self.shuffle {
            let mut rng = rng();
            questions.as_mut_slice().shuffle(&mut rng);
        }
        if let Some(limit) = self.limit {
            questions.truncate(limit);
        }

        info!(%source, count = questions.len(), "questions ready");
        Ok(questions)
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("clock", &self.clock)
            .field("source", &self.questions.describe())
            .field("shuffle", &self.shuffle)
            .field("limit", &self.limit)
            .finish()
    }
}
