use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{Question, QuestionDraft, QuestionId};
use exam_core::time::fixed_now;
use services::{Clock, QuizLoopService};
use storage::repository::{QuestionRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::exam::ExamTestHandles;
use crate::views::{ExamView, HomeView};
use crate::vm::{QuizIntent, QuizVm};

#[derive(Clone)]
struct TestApp {
    title: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn exam_title(&self) -> String {
        self.title.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Exam,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    exam_handles: Option<ExamTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.exam_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Exam => rsx! { ExamView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub exam_handles: Option<ExamTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending work until `done` accepts the rendered html, or give up
    /// after a bounded number of rounds.
    pub async fn render_until(&mut self, done: impl Fn(&str) -> bool) -> String {
        for _ in 0..10 {
            let html = self.render();
            if done(&html) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn exam_handles(&self) -> ExamTestHandles {
        self.exam_handles.clone().expect("exam handles present")
    }

    /// Send an intent to the exam view and settle the resulting render.
    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.exam_handles().dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Read the exam view model from inside the dom runtime.
    pub fn with_vm<T>(&self, read: impl FnOnce(Option<&QuizVm>) -> T) -> T {
        let vm = self.exam_handles().vm();
        self.dom.in_runtime(|| read(vm.read().as_ref()))
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn build_question(position: usize, category: Option<&str>) -> Question {
    QuestionDraft {
        prompt: format!("Sample question {}?", position + 1),
        options: vec![
            "First choice".into(),
            "Second choice".into(),
            "Third choice".into(),
            "Fourth choice".into(),
        ],
        correct_answer: "Second choice".into(),
        explanation: Some(format!("Explanation {}", position + 1)),
        category: category.map(str::to_owned),
    }
    .validate(QuestionId::from_position(position))
    .expect("valid sample question")
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        build_question(0, Some("Ethics")),
        build_question(1, Some("Ethics")),
        build_question(2, Some("Assessment")),
    ]
}

pub fn setup_view_harness(view: ViewKind, questions: Vec<Question>) -> ViewHarness {
    let storage = Storage::in_memory(questions);
    setup_view_harness_with_repo(view, Arc::clone(&storage.questions))
}

pub fn setup_view_harness_with_repo(
    view: ViewKind,
    repo: Arc<dyn QuestionRepository>,
) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(Clock::fixed(fixed_now()), repo));
    let exam_handles = match view {
        ViewKind::Exam => Some(ExamTestHandles::default()),
        ViewKind::Home => None,
    };

    let app = Arc::new(TestApp {
        title: "Practice Board Exam".to_string(),
        quiz_loop,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            exam_handles: exam_handles.clone(),
        },
    );

    ViewHarness { dom, exam_handles }
}
