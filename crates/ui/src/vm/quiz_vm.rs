use services::{QuizLoopService, QuizProgress, QuizService};

use crate::views::ViewError;
use crate::vm::report_vm::{ReportVm, map_report};

pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    /// Answer the current question with the option in this slot.
    Select(usize),
    Next,
    Previous,
    JumpTo(usize),
    TogglePin(usize),
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Submitted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub slot: usize,
    pub label: &'static str,
    pub text: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub number: usize,
    pub prompt: String,
    pub category: Option<String>,
    pub options: Vec<OptionVm>,
    pub pinned: bool,
    pub is_first: bool,
    pub is_last: bool,
}

/// One cell of the question-number grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCellVm {
    pub index: usize,
    pub number: usize,
    pub answered: bool,
    pub pinned: bool,
    pub current: bool,
}

impl GridCellVm {
    #[must_use]
    pub fn class(&self) -> String {
        let mut class = String::from("exam-grid__cell");
        if self.answered {
            class.push_str(" exam-grid__cell--answered");
        }
        if self.pinned {
            class.push_str(" exam-grid__cell--pinned");
        }
        if self.current {
            class.push_str(" exam-grid__cell--current");
        }
        class
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedVm {
    pub index: usize,
    pub number: usize,
    pub preview: String,
}

const PREVIEW_CHARS: usize = 60;

fn preview(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

pub struct QuizVm {
    quiz: QuizService,
}

impl QuizVm {
    #[must_use]
    pub fn new(quiz: QuizService) -> Self {
        Self { quiz }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizService {
        &self.quiz
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.quiz.progress()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.progress();
        format!("Question {} of {}", progress.current_number, progress.total)
    }

    #[must_use]
    pub fn answered_label(&self) -> String {
        let progress = self.progress();
        format!("{} of {} answered", progress.answered, progress.total)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.quiz.is_submitted()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.quiz.current_index()
    }

    #[must_use]
    pub fn question(&self) -> QuestionVm {
        let session = self.quiz.session();
        let index = session.current_index();
        let question = session.current_question();
        let selected = session.answer(index);
        let options = question
            .options()
            .iter()
            .zip(OPTION_LABELS)
            .enumerate()
            .map(|(slot, (text, label))| OptionVm {
                slot,
                label,
                text: text.clone(),
                checked: selected == Some(text.as_str()),
            })
            .collect();

        QuestionVm {
            index,
            number: index + 1,
            prompt: question.prompt().to_owned(),
            category: question.category().map(str::to_owned),
            options,
            pinned: session.is_pinned(index),
            is_first: session.is_first(),
            is_last: session.is_last(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> Vec<GridCellVm> {
        let session = self.quiz.session();
        let current = session.current_index();
        (0..session.len())
            .map(|index| GridCellVm {
                index,
                number: index + 1,
                answered: session.answer(index).is_some(),
                pinned: session.is_pinned(index),
                current: index == current,
            })
            .collect()
    }

    /// Pinned questions in question order.
    #[must_use]
    pub fn pinned(&self) -> Vec<PinnedVm> {
        let session = self.quiz.session();
        session
            .pins()
            .filter_map(|index| {
                session.question(index).map(|question| PinnedVm {
                    index,
                    number: index + 1,
                    preview: preview(question.prompt()),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn report(&self) -> Option<ReportVm> {
        self.quiz.report_view().as_ref().map(map_report)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Rejected` when the exam refuses the action.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<QuizOutcome, ViewError> {
        let result = match intent {
            QuizIntent::Select(slot) => {
                let option = self
                    .quiz
                    .current_question()
                    .options()
                    .get(slot)
                    .cloned()
                    .ok_or(ViewError::Rejected)?;
                self.quiz.select_current(&option)
            }
            QuizIntent::Next => self.quiz.go_next(),
            QuizIntent::Previous => self.quiz.go_previous(),
            QuizIntent::JumpTo(index) => self.quiz.jump_to(index),
            QuizIntent::TogglePin(index) => self.quiz.toggle_pin(index).map(|_| ()),
            QuizIntent::Submit => self.quiz.submit().map(|_| ()),
        };
        result.map_err(|err| ViewError::from(&err))?;

        if self.quiz.is_submitted() {
            Ok(QuizOutcome::Submitted)
        } else {
            Ok(QuizOutcome::Continue)
        }
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyExam` when the source has no questions.
/// Returns `ViewError::Source` when the source cannot be read.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let quiz = quiz_loop
        .start_session()
        .await
        .map_err(|err| ViewError::from(&err))?;
    Ok(QuizVm::new(quiz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{Question, QuestionDraft, QuestionId, QuizSession};
    use exam_core::time::fixed_clock;

    fn build_question(position: usize, prompt: &str) -> Question {
        QuestionDraft {
            prompt: prompt.to_string(),
            options: vec!["red".into(), "green".into(), "blue".into(), "gold".into()],
            correct_answer: "green".into(),
            explanation: None,
            category: Some("Colours".into()),
        }
        .validate(QuestionId::from_position(position))
        .unwrap()
    }

    fn build_vm() -> QuizVm {
        let questions = vec![
            build_question(0, "First?"),
            build_question(1, "Second?"),
            build_question(2, &"long ".repeat(30)),
        ];
        let session = QuizSession::new(questions).unwrap();
        QuizVm::new(QuizService::new(session, fixed_clock()))
    }

    #[test]
    fn select_marks_the_checked_option() {
        let mut vm = build_vm();
        assert_eq!(vm.apply(QuizIntent::Select(1)), Ok(QuizOutcome::Continue));

        let question = vm.question();
        assert_eq!(question.number, 1);
        assert!(question.is_first);
        let checked: Vec<_> = question.options.iter().filter(|o| o.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].text, "green");
        assert_eq!(checked[0].label, "B");
        assert_eq!(vm.answered_label(), "1 of 3 answered");
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut vm = build_vm();
        assert_eq!(vm.apply(QuizIntent::Select(9)), Err(ViewError::Rejected));
        assert_eq!(vm.progress().answered, 0);
    }

    #[test]
    fn grid_and_pins_follow_session() {
        let mut vm = build_vm();
        vm.apply(QuizIntent::Select(0)).unwrap();
        vm.apply(QuizIntent::TogglePin(2)).unwrap();
        vm.apply(QuizIntent::JumpTo(1)).unwrap();

        let grid = vm.grid();
        assert!(grid[0].answered && !grid[0].current);
        assert!(grid[1].current);
        assert!(grid[2].pinned);
        assert_eq!(
            grid[2].class(),
            "exam-grid__cell exam-grid__cell--pinned"
        );
        assert_eq!(vm.progress_label(), "Question 2 of 3");

        let pinned = vm.pinned();
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].number, 3);
        assert!(pinned[0].preview.ends_with('…'));
        assert!(pinned[0].preview.chars().count() <= PREVIEW_CHARS + 1);
    }

    #[test]
    fn submit_builds_report_and_locks_exam() {
        let mut vm = build_vm();
        vm.apply(QuizIntent::Select(1)).unwrap();
        assert!(vm.report().is_none());
        assert_eq!(vm.apply(QuizIntent::Submit), Ok(QuizOutcome::Submitted));

        let report = vm.report().unwrap();
        assert_eq!(report.score_label, "1 / 3");
        assert_eq!(vm.apply(QuizIntent::Next), Err(ViewError::Rejected));
        assert_eq!(vm.apply(QuizIntent::Submit), Err(ViewError::Rejected));
    }
}
