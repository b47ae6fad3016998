use std::sync::Arc;

use storage::repository::ScoreRepository;
use trials_core::model::{Feedback, PhaseId, PlayerError, PlayerName, QuestionPrompt};
use trials_core::{Catalog, QuizSession, SessionState, TransitionError};

use super::screen::{Notice, PhaseScreen, Screen};
use crate::leaderboard_service::LeaderboardService;
use crate::question_source::{NO_RESPONSE_FALLBACK, QuestionSource};

/// One user action, as delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAction {
    /// Welcome screen: the player typed a name and pressed start.
    Start { name: String },
    /// Phase screen: the player pressed submit with `choice` selected, if any.
    Submit {
        phase: PhaseId,
        choice: Option<String>,
    },
    /// Re-draw the current screen (e.g. periodic leaderboard refresh).
    Refresh,
    /// Leaderboard: begin a new playthrough.
    PlayAgain,
}

/// The screen to draw next, plus any feedback banners.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResponse {
    pub screen: Screen,
    pub notices: Vec<Notice>,
}

/// Request handler driving a `QuizSession` one action at a time.
///
/// `handle` never fails: rejected actions and store outages come back as
/// notices on top of the current screen.
#[derive(Clone)]
pub struct QuizFlow {
    catalog: Arc<Catalog>,
    scores: Arc<dyn ScoreRepository>,
    leaderboard: LeaderboardService,
    questions: Arc<dyn QuestionSource>,
}

impl QuizFlow {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        scores: Arc<dyn ScoreRepository>,
        questions: Arc<dyn QuestionSource>,
    ) -> Self {
        let leaderboard = LeaderboardService::new(Arc::clone(&scores));
        Self {
            catalog,
            scores,
            leaderboard,
            questions,
        }
    }

    #[must_use]
    pub fn with_leaderboard(mut self, leaderboard: LeaderboardService) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// A fresh session at the welcome screen.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(Arc::clone(&self.catalog))
    }

    /// Apply `action` to `session` and describe what to show next.
    pub async fn handle(&self, session: &mut QuizSession, action: QuizAction) -> QuizResponse {
        let notices = match action {
            QuizAction::Start { name } => self.start(session, &name),
            QuizAction::Submit { phase, choice } => {
                self.submit(session, phase, choice.as_deref()).await
            }
            QuizAction::Refresh => Vec::new(),
            QuizAction::PlayAgain => {
                if session.is_finished() {
                    *session = self.new_session();
                    Vec::new()
                } else {
                    vec![Notice::Rejected("the quiz is still in progress".into())]
                }
            }
        };

        QuizResponse {
            screen: self.render(session).await,
            notices,
        }
    }

    /// Screen for the session's current state.
    pub async fn render(&self, session: &QuizSession) -> Screen {
        match session.state() {
            SessionState::Welcome => Screen::welcome(),
            SessionState::InPhase(phase) => match self.phase_screen(session, phase).await {
                Some(screen) => Screen::Phase(screen),
                None => Screen::welcome(),
            },
            SessionState::Leaderboard => {
                let mut board = self.leaderboard.load().await;
                board.session_score = Some(session.score());
                Screen::Leaderboard(board)
            }
        }
    }

    fn start(&self, session: &mut QuizSession, raw_name: &str) -> Vec<Notice> {
        let name = match PlayerName::parse(raw_name) {
            Ok(name) => name,
            Err(PlayerError::EmptyName) => return vec![Notice::NameRequired],
            Err(err) => return vec![Notice::Rejected(err.to_string())],
        };

        match session.start(name) {
            Ok(first) => {
                tracing::info!(player = ?session.player(), phase = %first, "quiz started");
                Vec::new()
            }
            Err(err) => vec![Notice::Rejected(err.to_string())],
        }
    }

    async fn submit(
        &self,
        session: &mut QuizSession,
        phase: PhaseId,
        choice: Option<&str>,
    ) -> Vec<Notice> {
        let outcome = match session.submit_answer(phase, choice) {
            Ok(outcome) => outcome,
            Err(TransitionError::EmptyAnswer) => return vec![Notice::ChooseAnswer],
            Err(err) => {
                tracing::debug!(error = %err, "answer rejected");
                return vec![Notice::Rejected(err.to_string())];
            }
        };

        tracing::info!(
            phase = %outcome.phase,
            correct = outcome.correct,
            next = %outcome.next,
            "answer submitted"
        );

        let explanation = session
            .catalog()
            .get(outcome.phase)
            .map_or_else(
                || {
                    let fallback = Feedback::default();
                    if outcome.correct {
                        fallback.correct
                    } else {
                        fallback.incorrect
                    }
                },
                |spec| spec.question().feedback_for(outcome.correct).to_owned(),
            );

        if !outcome.correct {
            return vec![Notice::Incorrect { explanation }];
        }

        let mut notices = vec![Notice::Correct {
            points: outcome.points_awarded,
            explanation,
        }];
        if let Some(player) = session.player() {
            if let Err(err) = self.scores.upsert_add(player, outcome.points_awarded).await {
                tracing::warn!(player = %player, error = %err, "score not persisted");
                notices.push(Notice::ScoreNotSaved);
            }
        }
        notices
    }

    async fn phase_screen(&self, session: &QuizSession, phase: PhaseId) -> Option<PhaseScreen> {
        let spec = session.catalog().get(phase)?;
        let question = spec.question();
        let prompt = match question.prompt() {
            QuestionPrompt::Fixed(text) => text.clone(),
            QuestionPrompt::Generated { instruction } => {
                match self.questions.generate(instruction).await {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(phase = %phase, error = %err, "question generation failed");
                        NO_RESPONSE_FALLBACK.to_owned()
                    }
                }
            }
        };

        Some(PhaseScreen {
            phase,
            number: phase.number(),
            total: session.catalog().len(),
            title: format!("Clinical Trials - Phase {}", phase.number()),
            scenario: question.scenario().to_owned(),
            prompt,
            options: question.options().to_vec(),
            progress: session.current_progress().unwrap_or(1.0),
        })
    }
}
