use serde::Serialize;
use trials_core::model::{PhaseId, Player};

pub const WELCOME_TITLE: &str = "Welcome to Clinical Trials Adventure!";
pub const WELCOME_INTRO: &str = "Imagine you're a scientist testing a new superhero medicine! \
Your job is to test it step by step to make sure it's safe for everyone. \
Are you ready to begin your adventure?";

/// What the presentation layer should draw after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Welcome { title: String, intro: String },
    Phase(PhaseScreen),
    Leaderboard(LeaderboardScreen),
}

impl Screen {
    #[must_use]
    pub fn welcome() -> Self {
        Screen::Welcome {
            title: WELCOME_TITLE.to_owned(),
            intro: WELCOME_INTRO.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseScreen {
    pub phase: PhaseId,
    pub number: u8,
    /// Phases in this playthrough.
    pub total: usize,
    pub title: String,
    pub scenario: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// Fraction in (0, 1].
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LeaderboardScreen {
    pub rows: Vec<LeaderboardRow>,
    /// Set when the store could not be read; `rows` is then empty.
    pub warning: Option<String>,
    /// Points earned in the current playthrough, if there was one.
    pub session_score: Option<u32>,
}

impl LeaderboardScreen {
    #[must_use]
    pub fn from_players(players: &[Player]) -> Self {
        let rows = players
            .iter()
            .enumerate()
            .map(|(idx, player)| LeaderboardRow {
                rank: idx + 1,
                name: player.name().to_string(),
                score: player.score(),
            })
            .collect();
        Self {
            rows,
            warning: None,
            session_score: None,
        }
    }

    #[must_use]
    pub fn unavailable(warning: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            warning: Some(warning.into()),
            session_score: None,
        }
    }
}

/// Feedback banner attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", content = "detail", rename_all = "snake_case")]
pub enum Notice {
    /// The phase's own explanation plus the points earned.
    Correct { points: u32, explanation: String },
    /// The phase's explanation of the right answer; the quiz has moved on.
    Incorrect { explanation: String },
    NameRequired,
    ChooseAnswer,
    /// The action did not apply to the current state.
    Rejected(String),
    /// The answer counted for this session but the store did not record it.
    ScoreNotSaved,
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::Correct {
                points,
                explanation,
            } => format!("{explanation} +{points} points"),
            Notice::Incorrect { explanation } => explanation.clone(),
            Notice::NameRequired => "Please enter your name to start.".to_owned(),
            Notice::ChooseAnswer => "Choose an answer before submitting.".to_owned(),
            Notice::Rejected(reason) => format!("That action is not available: {reason}"),
            Notice::ScoreNotSaved => {
                "Your score could not be saved; the leaderboard may be out of date.".to_owned()
            }
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Correct { .. })
    }
}
