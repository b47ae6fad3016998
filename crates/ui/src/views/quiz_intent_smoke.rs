use services::{QuizAction, QuizVariant};
use trials_core::model::{PhaseId, PlayerName};

use super::test_harness::{ViewHarness, setup_quiz_harness};

async fn send(harness: &mut ViewHarness, action: QuizAction) {
    harness.handles.dispatch().call(action);
    harness.drive_async().await;
    harness.drive_async().await;
}

fn submit(phase: PhaseId, choice: &str) -> QuizAction {
    QuizAction::Submit {
        phase,
        choice: Some(choice.to_owned()),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_smoke_start_answer_and_finish() {
    let mut harness = setup_quiz_harness(QuizVariant::Standard);
    harness.rebuild();
    assert!(harness.render().contains("Start Adventure"));

    send(&mut harness, QuizAction::Start { name: "Alice".into() }).await;
    let html = harness.render();
    assert!(html.contains("Clinical Trials - Phase 1"), "{html}");
    assert!(html.contains("Phase 1 of 4"), "{html}");
    assert!(html.contains("small group of healthy volunteers"), "{html}");

    send(&mut harness, submit(PhaseId::Phase1, "To sell the medicine in stores")).await;
    let html = harness.render();
    assert!(
        html.contains("Oops! The main goal is to test safety first."),
        "{html}"
    );
    assert!(!html.contains("Try again"), "{html}");
    assert!(html.contains("Clinical Trials - Phase 2"), "{html}");

    send(&mut harness, submit(PhaseId::Phase2, "To check how well the medicine works")).await;
    assert!(harness.render().contains("Correct! 🎯 Effectiveness is key in Phase 2. +10 points"));

    send(
        &mut harness,
        submit(
            PhaseId::Phase3,
            "To confirm the medicine\u{2019}s effectiveness on a large scale",
        ),
    )
    .await;
    send(&mut harness, submit(PhaseId::Phase4, "To monitor long-term effects and safety")).await;

    let html = harness.render();
    assert!(html.contains("Leaderboard"), "{html}");
    assert!(html.contains("Alice"), "{html}");
    assert!(html.contains("30 points"), "{html}");
    assert!(html.contains("Play Again"), "{html}");

    let alice = PlayerName::parse("Alice").unwrap();
    assert_eq!(harness.storage.scores.score_of(&alice).await.unwrap(), Some(30));

    send(&mut harness, QuizAction::PlayAgain).await;
    assert!(harness.render().contains("Start Adventure"));
}

#[tokio::test(flavor = "current_thread")]
async fn extended_quiz_counts_six_phases() {
    let mut harness = setup_quiz_harness(QuizVariant::Extended);
    harness.rebuild();

    send(&mut harness, QuizAction::Start { name: "Bo".into() }).await;
    let html = harness.render();
    assert!(html.contains("Phase 1 of 6"), "{html}");
}
