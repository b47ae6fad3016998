use sqlx::Row;
use trials_core::model::{MAX_NAME_LEN, Player, PlayerName};

use super::SqliteRepository;
use super::mapping::{classify, limit_to_i64, map_player_row, score_from_i64, score_to_i64};
use crate::repository::{ScoreRepository, StorageError};

// Rows written by older builds may carry untrimmed names. Reads group on the
// trimmed name so "Alice" and "Alice " count as one player; `PlayerName`
// is always trimmed, so new writes land on the same key.

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn upsert_add(&self, name: &PlayerName, points: u32) -> Result<u32, StorageError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        // Single-statement increment-or-insert: no separate read, so two
        // sessions scoring the same name cannot overwrite each other.
        sqlx::query(
            r"
            INSERT INTO users (name, score)
            VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET
                score = COALESCE(users.score, 0) + excluded.score
            ",
        )
        .bind(name.as_str())
        .bind(score_to_i64(points))
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        let row = sqlx::query(
            r"
            SELECT SUM(COALESCE(score, 0)) AS total
            FROM users
            WHERE TRIM(name, char(32, 9, 10, 11, 12, 13)) = ?1
            ",
        )
        .bind(name.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await.map_err(classify)?;

        let total: Option<i64> = row
            .try_get("total")
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let total = score_from_i64(total.unwrap_or(0))?;
        tracing::debug!(player = %name, points, total, "score updated");
        Ok(total)
    }

    async fn top(&self, limit: u32) -> Result<Vec<Player>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                TRIM(name, char(32, 9, 10, 11, 12, 13)) AS player,
                SUM(COALESCE(score, 0)) AS total
            FROM users
            WHERE name IS NOT NULL
              AND TRIM(name, char(32, 9, 10, 11, 12, 13)) <> ''
              AND LENGTH(TRIM(name, char(32, 9, 10, 11, 12, 13))) <= ?2
            GROUP BY player
            ORDER BY total DESC, player ASC
            LIMIT ?1
            ",
        )
        .bind(limit_to_i64(limit))
        .bind(i64::try_from(MAX_NAME_LEN).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let mut players = Vec::with_capacity(rows.len());
        for row in rows {
            match map_player_row(&row) {
                Ok(player) => players.push(player),
                Err(err) => tracing::warn!(error = %err, "skipping unreadable leaderboard row"),
            }
        }
        Ok(players)
    }

    async fn score_of(&self, name: &PlayerName) -> Result<Option<u32>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT SUM(COALESCE(score, 0)) AS total
            FROM users
            WHERE TRIM(name, char(32, 9, 10, 11, 12, 13)) = ?1
            ",
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        let total: Option<i64> = row
            .try_get("total")
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        total.map(score_from_i64).transpose()
    }
}
