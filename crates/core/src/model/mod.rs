mod band;
mod ids;
mod question;
mod report;
mod session;

pub use band::{AT_PACE_MAX, AT_PACE_MIN, Band, Percentage};
pub use ids::{ParseIdError, QuestionId, SessionId};
pub use question::{OPTION_COUNT, Question, QuestionDraft, QuestionError};
pub use report::{CategoryScore, QuestionOutcome, ScoreReport};
pub use session::{QuizSession, SessionError, SessionStatus};
