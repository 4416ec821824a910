use std::sync::Arc;

use exam_core::model::Question;
use storage::repository::{QuestionRepository, StorageError};

use super::test_harness::{
    ViewHarness, ViewKind, sample_questions, setup_view_harness, setup_view_harness_with_repo,
};
use crate::vm::QuizIntent;

async fn loaded_exam(questions: Vec<Question>) -> (ViewHarness, String) {
    let mut harness = setup_view_harness(ViewKind::Exam, questions);
    harness.rebuild();
    let html = harness
        .render_until(|html| html.contains("exam-progress") || html.contains("exam-load-error"))
        .await;
    (harness, html)
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_title_and_source() {
    let mut harness = setup_view_harness(ViewKind::Home, sample_questions());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Practice Board Exam"), "missing title in {html}");
    assert!(
        html.contains("Questions from built-in question set"),
        "missing source in {html}"
    );
    assert!(html.contains("Start exam"), "missing start button in {html}");
    assert!(html.contains("65.33% to 71.33%"), "missing pace note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_first_question() {
    let (_harness, html) = loaded_exam(sample_questions()).await;
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("0 of 3 answered"), "missing answered count in {html}");
    assert!(html.contains("Sample question 1?"), "missing prompt in {html}");
    assert!(html.contains("Second choice"), "missing option in {html}");
    assert!(html.contains("Previous"), "missing previous in {html}");
    assert!(html.contains("Submit exam"), "missing submit in {html}");
    assert!(html.contains("No pinned questions."), "missing pinned list in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_answers_pins_and_submits() {
    let (mut harness, _) = loaded_exam(sample_questions()).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::TogglePin(1));
    let html = harness.render();
    assert!(html.contains("Question 2 of 3"), "missing progress in {html}");
    assert!(html.contains("1 of 3 answered"), "missing answered count in {html}");
    assert!(html.contains("Q2: Sample question 2?"), "missing pinned entry in {html}");
    assert!(html.contains("Unpin"), "missing unpin label in {html}");

    harness.dispatch(QuizIntent::JumpTo(2));
    harness.dispatch(QuizIntent::Select(0));
    harness.dispatch(QuizIntent::Submit);

    let submitted = harness.with_vm(|vm| vm.is_some_and(|vm| vm.is_submitted()));
    assert!(submitted);

    let html = harness.render();
    assert!(html.contains("Score: 1 / 3 (33.33%)"), "missing score in {html}");
    assert!(html.contains("Below pace"), "missing band in {html}");
    assert!(html.contains("Ethics"), "missing category row in {html}");
    assert!(html.contains("Assessment"), "missing category row in {html}");
    assert!(html.contains("category-chart__marker"), "missing markers in {html}");
    assert!(html.contains("Your answer: No answer"), "missing unanswered feedback in {html}");
    assert!(html.contains("Correct answer: Second choice"), "missing key in {html}");
    assert!(html.contains("Explanation 3"), "missing explanation in {html}");
    assert!(html.contains("New attempt"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_shows_rejected_action_inline() {
    let (mut harness, _) = loaded_exam(sample_questions()).await;

    harness.dispatch(QuizIntent::JumpTo(99));
    let html = harness.render();
    assert!(
        html.contains("That action is not available right now."),
        "missing inline error in {html}"
    );
    assert!(html.contains("Question 1 of 3"), "exam should stay usable in {html}");

    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(
        !html.contains("That action is not available right now."),
        "inline error should clear in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_empty_state() {
    let (_harness, html) = loaded_exam(Vec::new()).await;
    assert!(
        html.contains("No questions are available for this exam yet."),
        "missing empty message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

struct FailingRepository;

#[async_trait::async_trait]
impl QuestionRepository for FailingRepository {
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    fn describe(&self) -> String {
        "failing sheet".to_string()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_repo(ViewKind::Exam, Arc::new(FailingRepository));
    harness.rebuild();
    let html = harness
        .render_until(|html| html.contains("exam-load-error"))
        .await;
    assert!(html.contains("Error loading questions"), "missing error in {html}");
    assert!(html.contains("Source: failing sheet"), "missing source in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
