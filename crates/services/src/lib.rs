#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod leaderboard_service;
pub mod question_source;
pub mod quiz;

pub use trials_core::{Catalog, QuizSession, QuizVariant};

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionSourceError};
pub use leaderboard_service::{LEADERBOARD_SIZE, LeaderboardService};
pub use question_source::{
    ChatConfig, ChatQuestionSource, NO_RESPONSE_FALLBACK, QuestionSource, StaticQuestionSource,
};
pub use quiz::{
    LeaderboardRow, LeaderboardScreen, Notice, PhaseScreen, QuizAction, QuizFlow, QuizResponse,
    Screen,
};
