use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{THRESHOLD_MARKERS, format_percent};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let at_pace = format!(
        "{} to {}",
        format_percent(THRESHOLD_MARKERS[0]),
        format_percent(THRESHOLD_MARKERS[1])
    );

    rsx! {
        div { class: "page home-page",
            h2 { "{ctx.exam_title()}" }
            p { class: "home-source", "Questions from {ctx.source_label()}" }
            p { class: "home-note",
                "Scores between {at_pace} are on pace with the exam pass rate."
            }
            button {
                class: "btn btn-primary",
                id: "home-start",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Exam {});
                },
                "Start exam"
            }
        }
    }
}
