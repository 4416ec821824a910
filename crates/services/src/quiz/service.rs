use chrono::{DateTime, Duration, Utc};
use std::fmt;
use tracing::{debug, info, warn};

use exam_core::model::{Question, QuizSession, ScoreReport, SessionError};

use super::progress::QuizProgress;
use super::view::ReportView;
use crate::Clock;
use crate::error::QuizServiceError;

/// One in-memory exam attempt, stamped with start and submit times.
///
/// Wraps the pure `QuizSession` state machine. Every rejected operation is
/// logged and returned to the caller unchanged.
pub struct QuizService {
    session: QuizSession,
    clock: Clock,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl QuizService {
    /// Wrap a freshly created session. `started_at` is read from `clock`.
    #[must_use]
    pub fn new(session: QuizSession, clock: Clock) -> Self {
        let started_at = clock.now();
        info!(session = %session.id(), questions = session.len(), "quiz session started");
        Self {
            session,
            clock,
            started_at,
            submitted_at: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.session.current_question()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.session.is_submitted()
    }

    /// Time spent so far, or until submission once submitted.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let end = self.submitted_at.unwrap_or_else(|| self.clock.now());
        (end - self.started_at).max(Duration::zero())
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::from_session(&self.session)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` on an invalid index, option or state.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), QuizServiceError> {
        let result = self.session.select_answer(index, option);
        self.track("select_answer", result)?;
        debug!(session = %self.session.id(), index, option, "answer recorded");
        Ok(())
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Same as [`QuizService::select_answer`].
    pub fn select_current(&mut self, option: &str) -> Result<(), QuizServiceError> {
        self.select_answer(self.session.current_index(), option)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` after submission.
    pub fn go_next(&mut self) -> Result<(), QuizServiceError> {
        let result = self.session.go_next();
        self.track("go_next", result)?;
        debug!(session = %self.session.id(), current = self.session.current_index(), "moved next");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` after submission.
    pub fn go_previous(&mut self) -> Result<(), QuizServiceError> {
        let result = self.session.go_previous();
        self.track("go_previous", result)?;
        debug!(
            session = %self.session.id(),
            current = self.session.current_index(),
            "moved previous"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for an invalid index or after submission.
    pub fn jump_to(&mut self, index: usize) -> Result<(), QuizServiceError> {
        let result = self.session.jump_to(index);
        self.track("jump_to", result)?;
        debug!(session = %self.session.id(), current = index, "jumped");
        Ok(())
    }

    /// Returns `true` when the question is pinned after the call.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for an invalid index or after submission.
    pub fn toggle_pin(&mut self, index: usize) -> Result<bool, QuizServiceError> {
        let result = self.session.toggle_pin(index);
        let pinned = self.track("toggle_pin", result)?;
        debug!(session = %self.session.id(), index, pinned, "pin toggled");
        Ok(pinned)
    }

    /// Grade and close the attempt. `submitted_at` is read from the clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if already submitted.
    pub fn submit(&mut self) -> Result<&ScoreReport, QuizServiceError> {
        let result = self.session.submit().map(|report| {
            (report.total_correct(), report.total_questions())
        });
        let (correct, total) = self.track("submit", result)?;

        let submitted_at = self.clock.now();
        self.submitted_at = Some(submitted_at);
        info!(
            session = %self.session.id(),
            correct,
            total,
            elapsed_secs = (submitted_at - self.started_at).num_seconds(),
            "quiz session submitted"
        );

        self.session
            .report()
            .ok_or(QuizServiceError::Session(SessionError::InvalidState))
    }

    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        self.session.report()
    }

    /// Presentation-ready report, present once submitted.
    #[must_use]
    pub fn report_view(&self) -> Option<ReportView> {
        let report = self.session.report()?;
        let submitted_at = self.submitted_at?;
        Some(ReportView::build(&self.session, report, self.started_at, submitted_at))
    }

    fn track<T>(
        &self,
        operation: &'static str,
        result: Result<T, SessionError>,
    ) -> Result<T, QuizServiceError> {
        result.map_err(|err| {
            warn!(
                session = %self.session.id(),
                operation,
                error = %err,
                "session operation rejected"
            );
            QuizServiceError::Session(err)
        })
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("session_id", &self.session.id())
            .field("questions", &self.session.len())
            .field("current", &self.session.current_index())
            .field("answered", &self.session.answered_count())
            .field("pinned", &self.session.pin_count())
            .field("started_at", &self.started_at)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
