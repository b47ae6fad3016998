use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trials_core::model::{Player, PlayerName};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The backing store could not be reached (missing, locked, or unreadable file).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

/// Persistent mapping from player name to cumulative score.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Add `points` to `name`'s score, creating the player if absent.
    ///
    /// The read-modify-write is atomic: concurrent calls for the same name are
    /// all reflected in the final score.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the score cannot be stored.
    async fn upsert_add(&self, name: &PlayerName, points: u32) -> Result<u32, StorageError>;

    /// Up to `limit` players ordered by score descending, then name ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn top(&self, limit: u32) -> Result<Vec<Player>, StorageError>;

    /// Current score of `name`, if the player exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn score_of(&self, name: &PlayerName) -> Result<Option<u32>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    scores: Arc<Mutex<HashMap<PlayerName, u32>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn upsert_add(&self, name: &PlayerName, points: u32) -> Result<u32, StorageError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let score = guard.entry(name.clone()).or_insert(0);
        *score = score.saturating_add(points);
        Ok(*score)
    }

    async fn top(&self, limit: u32) -> Result<Vec<Player>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut players: Vec<Player> = guard
            .iter()
            .map(|(name, score)| Player::new(name.clone(), *score))
            .collect();
        players.sort_by(|a, b| {
            b.score()
                .cmp(&a.score())
                .then_with(|| a.name().cmp(b.name()))
        });
        players.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(players)
    }

    async fn score_of(&self, name: &PlayerName) -> Result<Option<u32>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(name).copied())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let scores: Arc<dyn ScoreRepository> = Arc::new(InMemoryRepository::new());
        Self { scores }
    }
}
