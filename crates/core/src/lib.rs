#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod session;

pub use catalog::{Catalog, CatalogError, PhaseSpec, QuizVariant};
pub use error::Error;
pub use model::{
    Feedback, PhaseId, Player, PlayerError, PlayerName, Question, QuestionError, QuestionPrompt,
    Successor,
};
pub use session::{
    AnswerOutcome, POINTS_PER_CORRECT_ANSWER, QuizSession, SessionState, TransitionError,
};
