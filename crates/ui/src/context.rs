use std::sync::Arc;
use std::time::Duration;

use services::{LeaderboardService, QuizFlow, QuizVariant};

/// How often the leaderboard screen re-reads the store.
pub const LEADERBOARD_REFRESH: Duration = Duration::from_secs(10);

pub trait UiApp: Send + Sync {
    fn variant(&self) -> QuizVariant;

    fn quiz(&self) -> Arc<QuizFlow>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;

    fn leaderboard_refresh(&self) -> Duration {
        LEADERBOARD_REFRESH
    }
}

#[derive(Clone)]
pub struct AppContext {
    variant: QuizVariant,
    leaderboard_refresh: Duration,

    quiz: Arc<QuizFlow>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            variant: app.variant(),
            leaderboard_refresh: app.leaderboard_refresh(),
            quiz: app.quiz(),
            leaderboard: app.leaderboard(),
        }
    }

    #[must_use]
    pub fn variant(&self) -> QuizVariant {
        self.variant
    }

    #[must_use]
    pub fn leaderboard_refresh(&self) -> Duration {
        self.leaderboard_refresh
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizFlow> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
