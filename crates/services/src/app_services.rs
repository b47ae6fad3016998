use std::sync::Arc;

use storage::repository::Storage;
use trials_core::{Catalog, QuizVariant};

use crate::error::AppServicesError;
use crate::leaderboard_service::LeaderboardService;
use crate::question_source::{ChatQuestionSource, QuestionSource};
use crate::quiz::QuizFlow;

/// Assembles app-facing services over one score store.
#[derive(Clone)]
pub struct AppServices {
    variant: QuizVariant,
    quiz: Arc<QuizFlow>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, with question generation
    /// configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the HTTP
    /// client cannot be built.
    pub async fn new_sqlite(db_url: &str, variant: QuizVariant) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let questions: Arc<dyn QuestionSource> = Arc::new(ChatQuestionSource::from_env()?);
        Ok(Self::from_storage(&storage, variant, questions))
    }

    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        variant: QuizVariant,
        questions: Arc<dyn QuestionSource>,
    ) -> Self {
        let catalog = Arc::new(Catalog::for_variant(variant));
        let leaderboard = LeaderboardService::new(Arc::clone(&storage.scores));
        let quiz = QuizFlow::new(catalog, Arc::clone(&storage.scores), questions)
            .with_leaderboard(leaderboard.clone());

        Self {
            variant,
            quiz: Arc::new(quiz),
            leaderboard: Arc::new(leaderboard),
        }
    }

    #[must_use]
    pub fn variant(&self) -> QuizVariant {
        self.variant
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
