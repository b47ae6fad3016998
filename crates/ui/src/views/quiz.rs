#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use services::{QuizAction, QuizFlow, QuizResponse, QuizSession, Screen};

use crate::context::AppContext;
use crate::views::{LeaderboardView, NoticeList, PhaseView, WelcomeView};
use crate::vm::{PhaseVm, map_leaderboard, map_notices};

/// Signals behind the game page plus the single entry point that mutates them.
#[derive(Clone, Copy)]
struct QuizState {
    session: Signal<QuizSession>,
    response: Signal<Option<QuizResponse>>,
    busy: Signal<bool>,
    dispatch: Callback<QuizAction>,
}

fn use_quiz_state(quiz: Arc<QuizFlow>) -> QuizState {
    let session = use_signal({
        let quiz = quiz.clone();
        move || quiz.new_session()
    });
    let response = use_signal(|| None::<QuizResponse>);
    let busy = use_signal(|| false);

    let dispatch = use_callback(move |action: QuizAction| {
        let quiz = quiz.clone();
        let mut session = session;
        let mut response = response;
        let mut busy = busy;

        // One action at a time; a second click while a submit is in flight is dropped.
        if busy() {
            return;
        }
        busy.set(true);

        spawn(async move {
            let mut current = session.peek().clone();
            let next = quiz.handle(&mut current, action).await;
            session.set(current);
            response.set(Some(next));
            busy.set(false);
        });
    });

    QuizState {
        session,
        response,
        busy,
        dispatch,
    }
}

/// Root of the game. Owns the session and routes every action through
/// `QuizFlow::handle`, then draws whatever screen comes back.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_quiz_state(ctx.quiz());

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(state.dispatch);
            }
        }
    }

    quiz_page(state, ctx.leaderboard_refresh())
}

fn quiz_page(state: QuizState, refresh_every: Duration) -> Element {
    let QuizState {
        session,
        response,
        busy,
        dispatch,
    } = state;

    let (screen, notices) = match response.read().clone() {
        Some(QuizResponse { screen, notices }) => (screen, notices),
        None => (Screen::welcome(), Vec::new()),
    };
    let notices = map_notices(&notices);
    let player = session
        .read()
        .player()
        .map(|name| name.as_str().to_owned());
    let is_busy = busy();

    rsx! {
        div { class: "page page--quiz",
            NoticeList { notices }
            match screen {
                Screen::Welcome { title, intro } => rsx! {
                    WelcomeView {
                        title,
                        intro,
                        busy: is_busy,
                        on_start: move |name: String| dispatch.call(QuizAction::Start { name }),
                    }
                },
                Screen::Phase(phase_screen) => {
                    let phase = phase_screen.phase;
                    rsx! {
                        PhaseView {
                            key: "{phase}",
                            vm: PhaseVm::from(&phase_screen),
                            busy: is_busy,
                            on_submit: move |choice: Option<String>| {
                                dispatch.call(QuizAction::Submit { phase, choice });
                            },
                        }
                    }
                }
                Screen::Leaderboard(board) => rsx! {
                    LeaderboardView {
                        vm: map_leaderboard(&board, player.as_deref()),
                        refresh_every,
                        busy: is_busy,
                        on_refresh: move |()| dispatch.call(QuizAction::Refresh),
                        on_play_again: move |()| dispatch.call(QuizAction::PlayAgain),
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizAction>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizAction>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizAction> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
