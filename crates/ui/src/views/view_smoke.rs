use std::time::Duration;

use dioxus::prelude::*;
use services::{LeaderboardRow, LeaderboardScreen, PhaseScreen, QuizVariant};
use trials_core::model::PhaseId;

use super::test_harness::{render_once, setup_quiz_harness};
use crate::views::{LeaderboardTable, LeaderboardView, PhaseView};
use crate::vm::{EMPTY_LEADERBOARD, PhaseVm, map_leaderboard};

fn phase_vm() -> PhaseVm {
    PhaseVm::from(&PhaseScreen {
        phase: PhaseId::Phase2,
        number: 2,
        total: 4,
        title: "Clinical Trials - Phase 2".into(),
        scenario: "The medicine passed its safety test.".into(),
        prompt: "What is the main goal of Phase 2?".into(),
        options: vec![
            "To check how well the medicine works".into(),
            "To make the medicine taste better".into(),
            "To sell it right away".into(),
        ],
        progress: 0.5,
    })
}

fn board() -> LeaderboardScreen {
    LeaderboardScreen {
        rows: vec![
            LeaderboardRow {
                rank: 1,
                name: "Alice".into(),
                score: 20,
            },
            LeaderboardRow {
                rank: 2,
                name: "Bob".into(),
                score: 10,
            },
        ],
        warning: None,
        session_score: Some(10),
    }
}

fn renders_disabled(html: &str) -> bool {
    html.contains("disabled") && !html.contains("disabled=false") && !html.contains("disabled=\"false\"")
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_starts_on_welcome_screen() {
    let mut harness = setup_quiz_harness(QuizVariant::Standard);
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Welcome to Clinical Trials Adventure!"),
        "missing title in {html}"
    );
    assert!(html.contains("Start Adventure"), "missing start button in {html}");
    assert!(harness.storage.scores.top(10).await.unwrap().is_empty());
}

#[test]
fn phase_view_renders_progress_and_options() {
    fn root() -> Element {
        rsx! {
            PhaseView { vm: phase_vm(), busy: false, on_submit: move |_: Option<String>| {} }
        }
    }

    let html = render_once(root);
    assert!(html.contains("Clinical Trials - Phase 2"), "missing title in {html}");
    assert!(html.contains("width: 50%;"), "missing progress fill in {html}");
    assert!(html.contains("Phase 2 of 4"), "missing progress label in {html}");
    assert!(
        html.contains("To check how well the medicine works"),
        "missing option in {html}"
    );
    assert_eq!(html.matches("type=\"radio\"").count(), 3, "{html}");
}

#[test]
fn leaderboard_table_lists_ranked_rows() {
    fn root() -> Element {
        rsx! {
            LeaderboardTable { vm: map_leaderboard(&board(), Some("Bob")) }
        }
    }

    let html = render_once(root);
    assert!(html.contains("#1"), "missing rank in {html}");
    assert!(html.contains("Alice"), "missing name in {html}");
    assert!(html.contains("20 points"), "missing score in {html}");
    assert!(html.contains("leaderboard__row--current"), "missing highlight in {html}");
    assert!(!html.contains(EMPTY_LEADERBOARD));
}

#[test]
fn leaderboard_table_invites_first_player_when_empty() {
    fn root() -> Element {
        rsx! {
            LeaderboardTable { vm: map_leaderboard(&LeaderboardScreen::default(), None) }
        }
    }

    let html = render_once(root);
    assert!(html.contains(EMPTY_LEADERBOARD), "missing empty message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_shows_session_score_and_play_again() {
    fn root() -> Element {
        rsx! {
            LeaderboardView {
                vm: map_leaderboard(&board(), None),
                refresh_every: Duration::from_secs(3600),
                busy: false,
                on_refresh: move |()| {},
                on_play_again: move |()| {},
            }
        }
    }

    let html = render_once(root);
    assert!(html.contains("You earned 10 points this round."), "{html}");
    assert!(html.contains("Play Again"), "{html}");
    assert!(!renders_disabled(&html), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn play_again_is_disabled_while_busy() {
    fn root() -> Element {
        rsx! {
            LeaderboardView {
                vm: map_leaderboard(&board(), None),
                refresh_every: Duration::from_secs(3600),
                busy: true,
                on_refresh: move |()| {},
                on_play_again: move |()| {},
            }
        }
    }

    let html = render_once(root);
    assert!(renders_disabled(&html), "{html}");
}
