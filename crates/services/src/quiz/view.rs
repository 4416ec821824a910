use chrono::{DateTime, Utc};
use serde::Serialize;

use exam_core::model::{Band, Percentage, QuestionId, QuizSession, ScoreReport, SessionId};

/// Correct/total pair with its rounded percentage and band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreLine {
    pub correct: u32,
    pub total: u32,
    pub percent: f64,
    pub band: Band,
}

impl ScoreLine {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        let percent = Percentage::of(correct, total).map_or(0.0, Percentage::value);
        Self {
            correct,
            total,
            percent,
            band: Band::classify(percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub score: ScoreLine,
}

/// Per-question feedback shown after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackItem {
    pub index: usize,
    /// 1-based position in this session.
    pub number: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
    pub category: Option<String>,
    pub pinned: bool,
}

/// Presentation-agnostic result of a submitted session.
///
/// Carries numbers and flags only; the UI owns formatting and colours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub session_id: SessionId,
    pub overall: ScoreLine,
    pub categories: Vec<CategoryView>,
    pub questions: Vec<FeedbackItem>,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub elapsed_secs: i64,
}

impl ReportView {
    #[must_use]
    pub fn build(
        session: &QuizSession,
        report: &ScoreReport,
        started_at: DateTime<Utc>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let categories = report
            .per_category()
            .iter()
            .map(|c| CategoryView {
                name: c.category.clone(),
                score: ScoreLine::new(c.correct, c.total),
            })
            .collect();

        let questions = session
            .questions()
            .iter()
            .zip(report.outcomes())
            .map(|(question, outcome)| FeedbackItem {
                index: outcome.index,
                number: outcome.index + 1,
                question_id: question.id(),
                prompt: question.prompt().to_owned(),
                selected: outcome.selected.clone(),
                correct_answer: question.correct_answer().to_owned(),
                is_correct: outcome.is_correct,
                explanation: question.explanation().map(str::to_owned),
                category: question.category().map(str::to_owned),
                pinned: session.is_pinned(outcome.index),
            })
            .collect();

        Self {
            session_id: session.id(),
            overall: ScoreLine::new(report.total_correct(), report.total_questions()),
            categories,
            questions,
            started_at,
            submitted_at,
            elapsed_secs: (submitted_at - started_at).num_seconds().max(0),
        }
    }

    #[must_use]
    pub fn incorrect(&self) -> impl Iterator<Item = &FeedbackItem> {
        self.questions.iter().filter(|item| !item.is_correct)
    }
}
