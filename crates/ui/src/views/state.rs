use dioxus::prelude::*;
use services::QuizServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// The question source returned nothing to ask.
    EmptyExam,
    /// The question source could not be read.
    Source,
    /// The exam refused an action, e.g. answering after submission.
    Rejected,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::EmptyExam => "No questions are available for this exam yet.",
            ViewError::Source => {
                "Error loading questions. Check the question source and try again."
            }
            ViewError::Rejected => "That action is not available right now.",
        }
    }
}

impl From<&QuizServiceError> for ViewError {
    fn from(err: &QuizServiceError) -> Self {
        match err {
            QuizServiceError::Empty => ViewError::EmptyExam,
            QuizServiceError::Storage(_) => ViewError::Source,
            QuizServiceError::Session(_) => ViewError::Rejected,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
