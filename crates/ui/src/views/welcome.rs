use dioxus::prelude::*;

#[component]
pub fn WelcomeView(
    title: String,
    intro: String,
    busy: bool,
    on_start: EventHandler<String>,
) -> Element {
    let mut name = use_signal(String::new);

    rsx! {
        section { class: "screen screen--welcome",
            h1 { "{title}" }
            p { class: "intro", "{intro}" }
            div { class: "name-field",
                label { r#for: "player-name", "Enter your name:" }
                input {
                    id: "player-name",
                    r#type: "text",
                    autofocus: true,
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
            }
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_start.call(name.read().clone()),
                "Start Adventure"
            }
        }
    }
}
