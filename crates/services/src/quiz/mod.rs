mod flow;
mod screen;

// Public API of the quiz subsystem.
pub use flow::{QuizAction, QuizFlow, QuizResponse};
pub use screen::{LeaderboardRow, LeaderboardScreen, Notice, PhaseScreen, Screen};
