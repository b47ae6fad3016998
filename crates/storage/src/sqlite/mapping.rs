use sqlx::Row;
use trials_core::model::Player;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

// Primary SQLite result codes that mean "the file cannot be used right now".
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_READONLY: i32 = 8;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CANTOPEN: i32 = 14;

/// Classify a driver error into the storage taxonomy.
pub(crate) fn classify(err: sqlx::Error) -> StorageError {
    let unavailable = match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db) => {
            // A file opened read-only before any game created the schema.
            db.message().starts_with("no such table")
                || db
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .is_some_and(|code| {
                        matches!(
                            code & 0xff,
                            SQLITE_BUSY
                                | SQLITE_LOCKED
                                | SQLITE_READONLY
                                | SQLITE_IOERR
                                | SQLITE_CANTOPEN
                        )
                    })
        }
        _ => false,
    };

    if unavailable {
        StorageError::Unavailable(err.to_string())
    } else {
        StorageError::Connection(err.to_string())
    }
}

pub(crate) fn score_to_i64(points: u32) -> i64 {
    i64::from(points)
}

pub(crate) fn score_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid score: {v}")))
}

pub(crate) fn limit_to_i64(limit: u32) -> i64 {
    i64::from(limit)
}

pub(crate) fn map_player_row(row: &sqlx::sqlite::SqliteRow) -> Result<Player, StorageError> {
    let name: String = row.try_get("player").map_err(ser)?;
    let score: Option<i64> = row.try_get("total").map_err(ser)?;
    Player::from_persisted(name, score.unwrap_or(0)).map_err(ser)
}
