use dioxus::prelude::*;

use crate::vm::NoticeVm;

#[component]
pub fn NoticeList(notices: Vec<NoticeVm>) -> Element {
    if notices.is_empty() {
        return rsx! {};
    }

    rsx! {
        ul { class: "notices", role: "status",
            for (idx, notice) in notices.iter().enumerate() {
                li { key: "{idx}", class: notice.class, "{notice.text}" }
            }
        }
    }
}
