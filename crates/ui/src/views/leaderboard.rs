use std::time::Duration;

use dioxus::prelude::*;

use crate::vm::LeaderboardVm;

#[component]
pub fn LeaderboardTable(vm: LeaderboardVm) -> Element {
    rsx! {
        if let Some(warning) = vm.warning.as_ref() {
            p { class: "notice notice--error", "{warning}" }
        }
        if let Some(message) = vm.empty_message() {
            p { class: "leaderboard__empty", "{message}" }
        }
        ol { class: "leaderboard",
            for row in vm.rows.iter() {
                li {
                    key: "{row.rank_label}",
                    class: if row.is_current { "leaderboard__row leaderboard__row--current" } else { "leaderboard__row" },
                    span { class: "leaderboard__rank", "{row.rank_label}" }
                    span { class: "leaderboard__name", "{row.name}" }
                    span { class: "leaderboard__score", "{row.score_label}" }
                }
            }
        }
    }
}

/// Top scores, re-read every `refresh_every` while mounted.
#[component]
pub fn LeaderboardView(
    vm: LeaderboardVm,
    refresh_every: Duration,
    busy: bool,
    on_refresh: EventHandler<()>,
    on_play_again: EventHandler<()>,
) -> Element {
    use_future(move || async move {
        loop {
            tokio::time::sleep(refresh_every).await;
            on_refresh.call(());
        }
    });

    rsx! {
        section { class: "screen screen--leaderboard",
            h1 { "Leaderboard" }
            if let Some(line) = vm.session_line.as_ref() {
                p { class: "session-score", "{line}" }
            }
            LeaderboardTable { vm: vm.clone() }
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_play_again.call(()),
                "Play Again"
            }
        }
    }
}
