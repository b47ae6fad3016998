use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("player name must not be empty")]
    EmptyName,

    #[error("player name is too long: {len} characters (max {MAX_NAME_LEN})")]
    TooLong { len: usize },

    #[error("score must not be negative, got {0}")]
    NegativeScore(i64),
}

/// Identity key of a player on the leaderboard.
///
/// Always trimmed and non-empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Parse a raw name as typed by the player.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::EmptyName` for blank input and
    /// `PlayerError::TooLong` past `MAX_NAME_LEN` characters.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, PlayerError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PlayerError::EmptyName);
        }
        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(PlayerError::TooLong { len });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = PlayerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PlayerName> for String {
    fn from(value: PlayerName) -> Self {
        value.0
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerName({:?})", self.0)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leaderboard row: a player and their cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: PlayerName,
    score: u32,
}

impl Player {
    #[must_use]
    pub fn new(name: PlayerName, score: u32) -> Self {
        Self { name, score }
    }

    /// Rehydrate a player from a stored `(name, score)` row.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if the stored name is blank or the score is negative.
    pub fn from_persisted(name: String, score: i64) -> Result<Self, PlayerError> {
        let name = PlayerName::parse(name)?;
        let score = u32::try_from(score).map_err(|_| PlayerError::NegativeScore(score))?;
        Ok(Self { name, score })
    }

    #[must_use]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}
