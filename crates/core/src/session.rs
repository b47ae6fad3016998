use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::{PhaseId, PlayerName, Successor};

/// Points added to a player's score for each correct answer.
pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("session already started")]
    AlreadyStarted,

    #[error("answer for {got} rejected while session is at {current}")]
    InvalidTransition { current: SessionState, got: PhaseId },

    #[error("no answer chosen")]
    EmptyAnswer,

    #[error("{choice:?} is not an option for {phase}")]
    UnknownOption { phase: PhaseId, choice: String },
}

/// Where a playthrough currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Welcome,
    InPhase(PhaseId),
    Leaderboard,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Welcome => f.write_str("welcome"),
            SessionState::InPhase(id) => write!(f, "{id}"),
            SessionState::Leaderboard => f.write_str("leaderboard"),
        }
    }
}

impl From<Successor> for SessionState {
    fn from(value: Successor) -> Self {
        match value {
            Successor::Phase(id) => SessionState::InPhase(id),
            Successor::Leaderboard => SessionState::Leaderboard,
        }
    }
}

/// Result of a defined answer. The session has already moved to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub phase: PhaseId,
    pub correct: bool,
    pub points_awarded: u32,
    pub next: SessionState,
}

/// One player's playthrough from welcome screen to leaderboard.
///
/// The state only moves forward along the catalog's successor chain. `score`
/// mirrors what this session earned; the score store stays the source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    state: SessionState,
    player: Option<PlayerName>,
    score: u32,
}

impl QuizSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: SessionState::Welcome,
            player: None,
            score: 0,
        }
    }

    /// Register the player and enter the first phase.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::AlreadyStarted` outside the welcome state.
    pub fn start(&mut self, name: PlayerName) -> Result<PhaseId, TransitionError> {
        if self.state != SessionState::Welcome {
            return Err(TransitionError::AlreadyStarted);
        }
        let first = self.catalog.first();
        self.player = Some(name);
        self.score = 0;
        self.state = SessionState::InPhase(first);
        Ok(first)
    }

    /// Grade `choice` for `phase` and move to the phase's successor.
    ///
    /// Rejections leave the session untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if `phase` is not the current phase.
    /// - `EmptyAnswer` if no option was chosen.
    /// - `UnknownOption` if `choice` is not listed for `phase`.
    pub fn submit_answer(
        &mut self,
        phase: PhaseId,
        choice: Option<&str>,
    ) -> Result<AnswerOutcome, TransitionError> {
        if self.state != SessionState::InPhase(phase) {
            return Err(TransitionError::InvalidTransition {
                current: self.state,
                got: phase,
            });
        }
        let spec = self
            .catalog
            .get(phase)
            .ok_or(TransitionError::InvalidTransition {
                current: self.state,
                got: phase,
            })?;

        let choice = match choice {
            Some(choice) if !choice.is_empty() => choice,
            _ => return Err(TransitionError::EmptyAnswer),
        };
        let question = spec.question();
        if !question.has_option(choice) {
            return Err(TransitionError::UnknownOption {
                phase,
                choice: choice.to_owned(),
            });
        }

        let correct = question.is_correct(choice);
        let points_awarded = if correct { POINTS_PER_CORRECT_ANSWER } else { 0 };
        let next = SessionState::from(spec.successor());

        self.score = self.score.saturating_add(points_awarded);
        self.state = next;

        Ok(AnswerOutcome {
            phase,
            correct,
            points_awarded,
            next,
        })
    }

    /// Fraction of the quiz reached, for the progress bar.
    ///
    /// `None` outside a phase (welcome or leaderboard).
    #[must_use]
    pub fn current_progress(&self) -> Option<f64> {
        self.current_phase()
            .and_then(|phase| self.catalog.progress_of(phase))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn current_phase(&self) -> Option<PhaseId> {
        match self.state {
            SessionState::InPhase(id) => Some(id),
            SessionState::Welcome | SessionState::Leaderboard => None,
        }
    }

    #[must_use]
    pub fn player(&self) -> Option<&PlayerName> {
        self.player.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Leaderboard
    }
}
