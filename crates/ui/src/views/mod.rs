mod leaderboard;
mod notices;
mod phase;
mod quiz;
mod welcome;

#[cfg(test)]
mod quiz_intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use leaderboard::{LeaderboardTable, LeaderboardView};
pub use notices::NoticeList;
pub use phase::{PhaseView, ProgressBar};
pub use quiz::QuizView;
pub use welcome::WelcomeView;
