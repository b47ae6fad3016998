use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::QuizView;
use crate::vm::window_title;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let title = window_title(ctx.variant());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "{title}" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizView {}
            }
        }
    }
}
