#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod quiz;

pub use exam_core::Clock;

pub use app_services::AppServices;
pub use config::{QuestionSource, QuizConfig};
pub use error::{AppServicesError, ConfigError, QuizServiceError};
pub use quiz::{
    CategoryView, FeedbackItem, QuizLoopService, QuizProgress, QuizService, ReportView, ScoreLine,
};
