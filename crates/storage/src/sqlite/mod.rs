use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{ScoreRepository, Storage};

mod mapping;
mod migrate;
mod score_repo;

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    /// The database file does not exist and the caller asked not to create it.
    #[error("database not found at: {path}")]
    Missing { path: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL, creating the file if missing.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL is invalid or the connection cannot
    /// be established.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Self::connect_with(options).await
    }

    /// Open an existing database file read-only. Nothing is created or
    /// migrated; a file without the `users` table reads as unavailable.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError::Missing` if the file does not exist, or
    /// `SqliteInitError::Sqlx` if it cannot be opened.
    pub async fn open_existing(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(false)
            .read_only(true);
        let path = options.get_filename();
        if !path.exists() {
            return Err(SqliteInitError::Missing {
                path: path.display().to_string(),
            });
        }
        Self::pool_with(options.busy_timeout(Duration::from_secs(5))).await
    }

    async fn connect_with(options: SqliteConnectOptions) -> Result<Self, SqliteInitError> {
        // Every operation checks a connection out of the pool and returns it
        // when done; busy_timeout lets concurrent writers queue instead of failing.
        let options = options
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        Self::pool_with(options).await
    }

    async fn pool_with(options: SqliteConnectOptions) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist. Safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        Ok(Self::from_sqlite(repo))
    }

    /// Read-only `Storage` over a database file that must already exist.
    /// Writes through it fail with `StorageError::Unavailable`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError::Missing` if the file is absent.
    pub async fn sqlite_existing(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open_existing(database_url).await?;
        Ok(Self::from_sqlite(repo))
    }

    fn from_sqlite(repo: SqliteRepository) -> Self {
        let scores: Arc<dyn ScoreRepository> = Arc::new(repo);
        Self { scores }
    }
}
