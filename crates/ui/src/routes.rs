use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{ExamView, HomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/exam", ExamView)] Exam {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { class: "topbar__title", to: Route::Home {}, "{ctx.exam_title()}" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
