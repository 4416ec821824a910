use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    GridCellVm, PinnedVm, QuestionVm, QuizIntent, QuizVm, ReportVm, format_datetime, start_quiz,
};

use super::keyboard::key_intent;
use super::results::ResultsPanel;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Owned copy of everything one render needs, so the signal is not held
/// across the rsx body.
#[derive(Clone, Debug, PartialEq)]
struct ExamSnapshot {
    progress_label: String,
    answered_label: String,
    unanswered: usize,
    question: QuestionVm,
    grid: Vec<GridCellVm>,
    pinned: Vec<PinnedVm>,
    report: Option<ReportVm>,
    submitted_label: String,
}

impl ExamSnapshot {
    fn from_vm(vm: &QuizVm) -> Self {
        Self {
            progress_label: vm.progress_label(),
            answered_label: vm.answered_label(),
            unanswered: vm.progress().unanswered,
            question: vm.question(),
            grid: vm.grid(),
            pinned: vm.pinned(),
            report: vm.report(),
            submitted_label: vm
                .quiz()
                .submitted_at()
                .map(format_datetime)
                .unwrap_or_default(),
        }
    }
}

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);

    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut error = error;
        let mut vm = vm;

        async move {
            vm.set(None);
            error.set(None);
            let started = start_quiz(&quiz_loop).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut error = error;
        let mut vm = vm;
        let result = match vm.write().as_mut() {
            Some(quiz) => quiz.apply(intent),
            None => Err(ViewError::Unknown),
        };
        match result {
            Ok(_) => error.set(None),
            Err(err) => error.set(Some(err)),
        }
    });

    // Restarting the resource refetches questions and opens a fresh session.
    let on_restart = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ExamTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let on_key = move |evt: KeyboardEvent| {
        let current = vm
            .read()
            .as_ref()
            .filter(|quiz| !quiz.is_submitted())
            .map(QuizVm::current_index);
        let Some(current) = current else {
            return;
        };
        if let Some(intent) = key_intent(&evt.data.key(), current) {
            evt.prevent_default();
            dispatch_intent.call(intent);
        }
    };

    let state = view_state_from_resource(&resource);
    let snapshot = vm.read().as_ref().map(ExamSnapshot::from_vm);
    let inline_error = *error.read();

    rsx! {
        div { class: "page exam-page", id: "exam-root", tabindex: "0", onkeydown: on_key,
            h2 { class: "exam-title", "{ctx.exam_title()}" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "exam-status", "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "exam-load-error", role: "alert",
                        p { "{err.message()}" }
                        p { class: "exam-load-error__source", "Source: {ctx.source_label()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "exam-retry",
                            r#type: "button",
                            onclick: move |_| on_restart.call(()),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = inline_error {
                        p { class: "exam-inline-error", role: "alert", "{err.message()}" }
                    }
                    match snapshot {
                        None => rsx! {
                            p { class: "exam-status", "Loading questions..." }
                        },
                        Some(snapshot) => match snapshot.report {
                            Some(report) => rsx! {
                                ResultsPanel {
                                    report,
                                    submitted_label: snapshot.submitted_label,
                                    on_restart,
                                }
                            },
                            None => rsx! {
                                div { class: "exam-progress",
                                    span { class: "exam-progress__position", "{snapshot.progress_label}" }
                                    span { class: "exam-progress__answered", "{snapshot.answered_label}" }
                                }
                                div { class: "exam-layout",
                                    QuestionPanel { question: snapshot.question, on_intent: dispatch_intent }
                                    aside { class: "exam-sidebar",
                                        QuestionGrid { cells: snapshot.grid, on_intent: dispatch_intent }
                                        PinnedList { pinned: snapshot.pinned, on_intent: dispatch_intent }
                                        button {
                                            class: "btn btn-primary exam-submit",
                                            id: "exam-submit",
                                            r#type: "button",
                                            onclick: move |_| dispatch_intent.call(QuizIntent::Submit),
                                            "Submit exam"
                                        }
                                        if snapshot.unanswered > 0 {
                                            p { class: "exam-submit__note",
                                                "{snapshot.unanswered} unanswered questions will be marked incorrect."
                                            }
                                        }
                                    }
                                }
                            },
                        },
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(question: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = question.index;
    let pin_label = if question.pinned { "Unpin" } else { "Pin for review" };

    rsx! {
        section { class: "exam-question",
            if let Some(category) = question.category.as_ref() {
                p { class: "exam-question__category", "{category}" }
            }
            h3 { class: "exam-question__prompt", id: "exam-prompt", "{question.prompt}" }
            fieldset { class: "exam-options", aria_labelledby: "exam-prompt",
                for option in question.options {
                    label {
                        class: if option.checked { "exam-option exam-option--checked" } else { "exam-option" },
                        key: "{option.slot}",
                        input {
                            r#type: "radio",
                            name: "exam-option-{index}",
                            value: "{option.text}",
                            checked: option.checked,
                            onchange: move |_| on_intent.call(QuizIntent::Select(option.slot)),
                        }
                        span { class: "exam-option__label", "{option.label}." }
                        span { class: "exam-option__text", "{option.text}" }
                    }
                }
            }
            div { class: "exam-nav",
                button {
                    class: "btn btn-secondary",
                    id: "exam-prev",
                    r#type: "button",
                    disabled: question.is_first,
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "Previous"
                }
                button {
                    class: if question.pinned { "btn btn-pin btn-pin--active" } else { "btn btn-pin" },
                    id: "exam-pin",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::TogglePin(index)),
                    "{pin_label}"
                }
                button {
                    class: "btn btn-secondary",
                    id: "exam-next",
                    r#type: "button",
                    disabled: question.is_last,
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn QuestionGrid(cells: Vec<GridCellVm>, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        nav { class: "exam-grid", aria_label: "Jump to question",
            for cell in cells {
                button {
                    class: cell.class(),
                    key: "{cell.index}",
                    r#type: "button",
                    aria_current: if cell.current { "step" } else { "false" },
                    onclick: move |_| on_intent.call(QuizIntent::JumpTo(cell.index)),
                    "{cell.number}"
                }
            }
        }
    }
}

#[component]
fn PinnedList(pinned: Vec<PinnedVm>, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "exam-pinned",
            h4 { "Pinned questions" }
            if pinned.is_empty() {
                p { class: "exam-pinned__empty", "No pinned questions." }
            } else {
                ul {
                    for pin in pinned {
                        li { key: "{pin.index}",
                            button {
                                class: "exam-pinned__item",
                                r#type: "button",
                                onclick: move |_| on_intent.call(QuizIntent::JumpTo(pin.index)),
                                "Q{pin.number}: {pin.preview}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ExamTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl ExamTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("exam dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("exam vm registered")
    }
}
