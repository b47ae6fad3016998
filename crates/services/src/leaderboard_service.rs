use std::sync::Arc;

use storage::repository::{ScoreRepository, StorageError};
use trials_core::model::Player;

use crate::quiz::LeaderboardScreen;

/// Number of players shown on the leaderboard.
pub const LEADERBOARD_SIZE: u32 = 10;

/// Read side of the score store.
#[derive(Clone)]
pub struct LeaderboardService {
    scores: Arc<dyn ScoreRepository>,
    size: u32,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self {
            scores,
            size: LEADERBOARD_SIZE,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Top players, highest score first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn top(&self) -> Result<Vec<Player>, StorageError> {
        self.scores.top(self.size).await
    }

    /// Leaderboard ready for display. A store failure yields an empty board
    /// with a warning instead of an error.
    pub async fn load(&self) -> LeaderboardScreen {
        match self.top().await {
            Ok(players) => LeaderboardScreen::from_players(&players),
            Err(err) => {
                tracing::warn!(error = %err, "leaderboard unavailable");
                LeaderboardScreen::unavailable(format!("Leaderboard unavailable: {err}"))
            }
        }
    }
}
