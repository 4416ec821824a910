use std::sync::Arc;

use services::QuizLoopService;

pub trait UiApp: Send + Sync {
    fn exam_title(&self) -> String;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    exam_title: String,
    source_label: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let quiz_loop = app.quiz_loop();
        Self {
            exam_title: app.exam_title(),
            source_label: quiz_loop.source_label(),
            quiz_loop,
        }
    }

    #[must_use]
    pub fn exam_title(&self) -> &str {
        &self.exam_title
    }

    /// Where questions are read from, for display only.
    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
