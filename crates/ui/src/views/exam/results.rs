use dioxus::prelude::*;

use crate::vm::{
    CategoryRowVm, FeedbackVm, ReportVm, THRESHOLD_MARKERS, format_percent, marker_style,
};

#[component]
pub(crate) fn ResultsPanel(
    report: ReportVm,
    submitted_label: String,
    on_restart: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "results", id: "exam-results",
            header { class: "results__header",
                h3 { class: "results__title", "Score: {report.score_label} ({report.percent_label})" }
                span { class: "{report.band_class}", "{report.band_label}" }
                p { class: "results__meta", "Time: {report.elapsed_label} · Submitted {submitted_label}" }
                p { class: "results__meta", "{report.incorrect_label}" }
            }
            if !report.categories.is_empty() {
                CategoryTable { rows: report.categories.clone() }
                CategoryChart { rows: report.categories.clone() }
            }
            FeedbackList { items: report.feedback.clone() }
            footer { class: "results__footer",
                button {
                    class: "btn btn-primary",
                    id: "exam-new-attempt",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "New attempt"
                }
            }
        }
    }
}

#[component]
fn CategoryTable(rows: Vec<CategoryRowVm>) -> Element {
    rsx! {
        table { class: "category-table",
            thead {
                tr {
                    th { "Category" }
                    th { "Score" }
                    th { "Percent" }
                    th { "Band" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.name}",
                        td { "{row.name}" }
                        td { "{row.score_label}" }
                        td { "{row.percent_label}" }
                        td { span { class: "{row.band_class}", "{row.band_label}" } }
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryChart(rows: Vec<CategoryRowVm>) -> Element {
    rsx! {
        div { class: "category-chart", role: "img", aria_label: "Score by category",
            for row in rows {
                div { class: "category-chart__row", key: "{row.name}",
                    span { class: "category-chart__label", "{row.name}" }
                    div { class: "category-chart__track",
                        div {
                            class: "category-chart__bar {row.band_class}",
                            style: "{row.bar_style}",
                        }
                        for marker in THRESHOLD_MARKERS {
                            div {
                                class: "category-chart__marker",
                                style: marker_style(marker),
                                title: format_percent(marker),
                            }
                        }
                    }
                    span { class: "category-chart__value", "{row.percent_label}" }
                }
            }
        }
    }
}

#[component]
fn FeedbackList(items: Vec<FeedbackVm>) -> Element {
    rsx! {
        ol { class: "feedback-list",
            for item in items {
                li { class: "{item.status_class}", key: "{item.number}",
                    div { class: "feedback__head",
                        span { class: "feedback__number", "Question {item.number}" }
                        span { class: "feedback__status", "{item.status_label}" }
                        if item.pinned {
                            span { class: "feedback__pinned", "Pinned" }
                        }
                        if let Some(category) = item.category.as_ref() {
                            span { class: "feedback__category", "{category}" }
                        }
                    }
                    p { class: "feedback__prompt", "{item.prompt}" }
                    p { class: "feedback__answer", "Your answer: {item.selected_label}" }
                    if !item.is_correct {
                        p { class: "feedback__answer feedback__answer--correct",
                            "Correct answer: {item.correct_answer}"
                        }
                    }
                    if let Some(explanation) = item.explanation.as_ref() {
                        p { class: "feedback__explanation", "{explanation}" }
                    }
                }
            }
        }
    }
}
