mod phase;
mod player;
mod question;

pub use phase::{PhaseId, Successor};
pub use player::{MAX_NAME_LEN, Player, PlayerError, PlayerName};
pub use question::{Feedback, OPTIONS_PER_QUESTION, Question, QuestionError, QuestionPrompt};
