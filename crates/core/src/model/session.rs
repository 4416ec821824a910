use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::Error;
use crate::model::ids::{QuestionId, SessionId};
use crate::model::question::{Question, QuestionDraft};
use crate::model::report::ScoreReport;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question index {index} is out of range for {len} questions")]
    InvalidIndex { index: usize, len: usize },

    #[error("option {option:?} is not a choice for question index {index}")]
    InvalidOption { index: usize, option: String },

    #[error("session has already been submitted")]
    InvalidState,

    #[error("a session needs at least one question")]
    NoQuestions,
}

/// Lifecycle of a quiz attempt. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

/// One user's attempt at a fixed, ordered question set.
///
/// All mutation goes through the operations below. A failing operation leaves
/// the session untouched. Once [`QuizSession::submit`] succeeds, every
/// mutating operation fails with [`SessionError::InvalidState`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: SessionId,
    questions: Arc<[Question]>,
    current: usize,
    answers: Vec<Option<String>>,
    pins: BTreeSet<usize>,
    status: SessionStatus,
    report: Option<ScoreReport>,
}

impl QuizSession {
    /// Start a session over `questions`, positioned at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` if `questions` is empty.
    pub fn new(questions: impl Into<Arc<[Question]>>) -> Result<Self, SessionError> {
        Self::with_id(SessionId::generate(), questions)
    }

    /// Same as [`QuizSession::new`] with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` if `questions` is empty.
    pub fn with_id(
        id: SessionId,
        questions: impl Into<Arc<[Question]>>,
    ) -> Result<Self, SessionError> {
        let questions = questions.into();
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        Ok(Self {
            id,
            answers: vec![None; questions.len()],
            questions,
            current: 0,
            pins: BTreeSet::new(),
            status: SessionStatus::InProgress,
            report: None,
        })
    }

    /// Validate `drafts` in order, numbering them from 1, and start a session.
    ///
    /// # Errors
    ///
    /// Returns `Error::Question` for the first invalid draft and
    /// `Error::Session` if there are no drafts.
    pub fn from_drafts(drafts: impl IntoIterator<Item = QuestionDraft>) -> Result<Self, Error> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(position, draft)| draft.validate(QuestionId::from_position(position)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(questions)?)
    }

    // ─── operations ──────────────────────────────────────────────────────────

    /// Record `option` as the answer to the question at `index`.
    ///
    /// Any index may be answered, not only the current one.
    ///
    /// # Errors
    ///
    /// `InvalidState` after submission, `InvalidIndex` for an out-of-range
    /// index, `InvalidOption` if `option` is not one of the question's choices.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        let question = self.checked_question(index)?;
        if !question.has_option(option) {
            return Err(SessionError::InvalidOption {
                index,
                option: option.to_owned(),
            });
        }
        self.answers[index] = Some(option.to_owned());
        Ok(())
    }

    /// Move to the next question. No-op on the last question.
    ///
    /// # Errors
    ///
    /// `InvalidState` after submission.
    pub fn go_next(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
        Ok(())
    }

    /// Move to the previous question. No-op on the first question.
    ///
    /// # Errors
    ///
    /// `InvalidState` after submission.
    pub fn go_previous(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Make the question at `index` current.
    ///
    /// # Errors
    ///
    /// `InvalidState` after submission, `InvalidIndex` for an out-of-range index.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.checked_question(index)?;
        self.current = index;
        Ok(())
    }

    /// Flip the pin on the question at `index`. Returns `true` if it is now pinned.
    ///
    /// # Errors
    ///
    /// `InvalidState` after submission, `InvalidIndex` for an out-of-range index.
    pub fn toggle_pin(&mut self, index: usize) -> Result<bool, SessionError> {
        self.ensure_in_progress()?;
        self.checked_question(index)?;
        if self.pins.remove(&index) {
            Ok(false)
        } else {
            self.pins.insert(index);
            Ok(true)
        }
    }

    /// Grade the attempt and close the session.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session was already submitted.
    pub fn submit(&mut self) -> Result<&ScoreReport, SessionError> {
        self.ensure_in_progress()?;
        let report = ScoreReport::grade(&self.questions, &self.answers);
        self.status = SessionStatus::Submitted;
        Ok(self.report.insert(report))
    }

    // ─── accessors ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.status == SessionStatus::Submitted
    }

    /// Number of questions. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Shared handle to the question list, for starting a fresh attempt.
    #[must_use]
    pub fn shared_questions(&self) -> Arc<[Question]> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(Option::as_deref)
    }

    /// One entry per question, `None` for unanswered.
    #[must_use]
    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn is_pinned(&self, index: usize) -> bool {
        self.pins.contains(&index)
    }

    /// Pinned indices in ascending order.
    pub fn pins(&self) -> impl Iterator<Item = usize> + '_ {
        self.pins.iter().copied()
    }

    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// The score, present once submitted.
    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    // ─── guards ──────────────────────────────────────────────────────────────

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::InProgress => Ok(()),
            SessionStatus::Submitted => Err(SessionError::InvalidState),
        }
    }

    fn checked_question(&self, index: usize) -> Result<&Question, SessionError> {
        self.questions.get(index).ok_or(SessionError::InvalidIndex {
            index,
            len: self.questions.len(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
