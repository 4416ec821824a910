mod progress;
mod service;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizServiceError;
pub use progress::QuizProgress;
pub use service::QuizService;
pub use view::{CategoryView, FeedbackItem, ReportView, ScoreLine};
pub use workflow::QuizLoopService;
