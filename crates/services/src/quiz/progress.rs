use exam_core::model::QuizSession;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub pinned: usize,
    /// 1-based position of the current question.
    pub current_number: usize,
    pub is_submitted: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let total = session.len();
        let answered = session.answered_count();
        Self {
            total,
            answered,
            unanswered: total - answered,
            pinned: session.pin_count(),
            current_number: session.current_index() + 1,
            is_submitted: session.is_submitted(),
        }
    }

    #[must_use]
    pub fn is_fully_answered(&self) -> bool {
        self.unanswered == 0
    }
}
