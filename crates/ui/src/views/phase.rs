use dioxus::prelude::*;

use crate::vm::PhaseVm;

#[component]
pub fn ProgressBar(percent: u8, label: String) -> Element {
    rsx! {
        div { class: "progress",
            div {
                class: "progress__track",
                role: "progressbar",
                aria_valuemin: "0",
                aria_valuemax: "100",
                aria_valuenow: "{percent}",
                div { class: "progress__fill", style: "width: {percent}%;" }
            }
            span { class: "progress__label", "{label}" }
        }
    }
}

/// One question. Mount with a per-phase `key` so the selection resets.
#[component]
pub fn PhaseView(vm: PhaseVm, busy: bool, on_submit: EventHandler<Option<String>>) -> Element {
    let mut selected = use_signal(|| None::<usize>);
    let submit_vm = vm.clone();

    rsx! {
        section { class: "screen screen--phase",
            h1 { "{vm.title}" }
            ProgressBar { percent: vm.progress_percent, label: vm.progress_label.clone() }
            p { class: "scenario", "{vm.scenario}" }
            p { class: "prompt", "{vm.prompt}" }
            fieldset { class: "options",
                for (index, option) in vm.options.iter().enumerate() {
                    label { key: "{option.id}", class: "option", r#for: "{option.id}",
                        input {
                            id: "{option.id}",
                            r#type: "radio",
                            name: "answer",
                            checked: selected() == Some(index),
                            onchange: move |_| selected.set(Some(index)),
                        }
                        span { "{option.label}" }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_submit.call(submit_vm.choice(selected())),
                "Submit"
            }
        }
    }
}
