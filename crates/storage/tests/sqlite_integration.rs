use std::sync::Arc;

use storage::repository::{ScoreRepository, Storage, StorageError};
use storage::sqlite::{SqliteInitError, SqliteRepository};
use tokio::task::JoinSet;
use trials_core::model::PlayerName;

fn name(raw: &str) -> PlayerName {
    PlayerName::parse(raw).unwrap()
}

async fn memory_repo(tag: &str) -> SqliteRepository {
    let url = format!("sqlite:file:memdb_{tag}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn upsert_creates_then_updates_single_row() {
    let repo = memory_repo("upsert_single").await;

    assert_eq!(repo.upsert_add(&name("Alice"), 10).await.unwrap(), 10);
    assert_eq!(repo.upsert_add(&name("Alice"), 10).await.unwrap(), 20);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE name = 'Alice'")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(repo.score_of(&name("Alice")).await.unwrap(), Some(20));
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let repo = memory_repo("migrate_twice").await;
    repo.upsert_add(&name("Alice"), 10).await.unwrap();

    repo.migrate().await.expect("second migrate");
    repo.migrate().await.expect("third migrate");

    assert_eq!(repo.score_of(&name("Alice")).await.unwrap(), Some(10));
}

#[tokio::test]
async fn top_returns_limit_sorted_descending() {
    let repo = memory_repo("top_limit").await;

    for i in 0..15_u32 {
        let player = name(&format!("player{i:02}"));
        repo.upsert_add(&player, (i % 5) * 10).await.unwrap();
    }

    let top = repo.top(10).await.unwrap();
    assert_eq!(top.len(), 10);
    for pair in top.windows(2) {
        assert!(pair[0].score() >= pair[1].score());
        if pair[0].score() == pair[1].score() {
            assert!(pair[0].name() < pair[1].name(), "ties ordered by name");
        }
    }
    assert!(top.iter().all(|p| p.name().as_str().starts_with("player")));
    assert_eq!(top[0].score(), 40);
    assert_eq!(top[0].name().as_str(), "player04");
}

#[tokio::test]
async fn top_on_empty_store_is_empty() {
    let repo = memory_repo("top_empty").await;
    assert!(repo.top(10).await.unwrap().is_empty());
    assert_eq!(repo.score_of(&name("Ghost")).await.unwrap(), None);
}

/// A file-backed database shaped like the one older builds wrote: the bare
/// `users` table, no migration bookkeeping, rows inserted verbatim.
async fn legacy_db(dir: &tempfile::TempDir, rows: &str) -> String {
    let url = format!("sqlite://{}", dir.path().join("legacy.db").display());
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    sqlx::query(
        "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE, score INTEGER DEFAULT 0)",
    )
    .execute(repo.pool())
    .await
    .unwrap();
    sqlx::query(&format!("INSERT INTO users (name, score) VALUES {rows}"))
        .execute(repo.pool())
        .await
        .unwrap();
    repo.pool().close().await;
    url
}

async fn board(storage: &Storage, limit: u32) -> Vec<(String, u32)> {
    storage
        .scores
        .top(limit)
        .await
        .unwrap()
        .iter()
        .map(|p| (p.name().to_string(), p.score()))
        .collect()
}

#[tokio::test]
async fn reads_tables_created_without_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let url = legacy_db(&dir, "('Dana', 30), ('   ', 99), ('Eve', NULL)").await;

    let viewer = Storage::sqlite_existing(&url).await.expect("open existing");
    assert_eq!(
        board(&viewer, 10).await,
        vec![("Dana".to_string(), 30), ("Eve".to_string(), 0)]
    );

    // The viewer is read-only: no bookkeeping tables appear in the file.
    let raw = SqliteRepository::connect(&url).await.expect("connect");
    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
    )
    .fetch_one(raw.pool())
    .await
    .unwrap();
    assert_eq!(tables, 0);
    let err = viewer.scores.upsert_add(&name("Dana"), 10).await.unwrap_err();
    assert!(err.is_unavailable(), "{err:?}");

    let game = Storage::sqlite(&url).await.expect("open and migrate");
    assert_eq!(game.scores.upsert_add(&name("Dana"), 10).await.unwrap(), 40);
}

#[tokio::test]
async fn blank_legacy_names_do_not_shorten_the_board() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows: Vec<String> = (0..11).map(|i| format!("('p{i:02}', {})", i * 10)).collect();
    rows.push("('   ', 500)".to_string());
    rows.push("('', 400)".to_string());
    let url = legacy_db(&dir, &rows.join(", ")).await;

    let storage = Storage::sqlite_existing(&url).await.expect("open existing");
    let top = board(&storage, 10).await;
    assert_eq!(top.len(), 10);
    assert_eq!(top[0], ("p10".to_string(), 100));
    assert_eq!(top[9], ("p01".to_string(), 10));
}

#[tokio::test]
async fn untrimmed_legacy_names_merge_with_new_writes() {
    let dir = tempfile::tempdir().unwrap();
    let url = legacy_db(&dir, "('Alice', 30), ('Alice ', 20), ('Bob', 10)").await;

    let storage = Storage::sqlite(&url).await.expect("open and migrate");
    assert_eq!(
        board(&storage, 10).await,
        vec![("Alice".to_string(), 50), ("Bob".to_string(), 10)]
    );

    assert_eq!(storage.scores.upsert_add(&name("Alice"), 10).await.unwrap(), 60);
    assert_eq!(storage.scores.score_of(&name("Alice")).await.unwrap(), Some(60));
    assert_eq!(board(&storage, 10).await[0], ("Alice".to_string(), 60));
}

#[tokio::test]
async fn null_scores_tie_with_zero_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let url = legacy_db(&dir, "('Zed', 0), ('Amy', NULL)").await;

    let storage = Storage::sqlite_existing(&url).await.expect("open existing");
    assert_eq!(
        board(&storage, 10).await,
        vec![("Amy".to_string(), 0), ("Zed".to_string(), 0)]
    );
}

#[tokio::test]
async fn viewer_on_file_without_schema_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    std::fs::File::create(&path).unwrap();
    let url = format!("sqlite://{}", path.display());

    let storage = Storage::sqlite_existing(&url).await.expect("open existing");
    let err = storage.scores.top(10).await.unwrap_err();
    assert!(err.is_unavailable(), "{err:?}");
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}

#[tokio::test]
async fn missing_file_is_reported_for_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("nope.db").display());

    let err = Storage::sqlite_existing(&url).await.err().expect("missing");
    assert!(matches!(err, SqliteInitError::Missing { .. }));
}

#[tokio::test]
async fn closed_pool_reports_unavailable() {
    let repo = memory_repo("closed_pool").await;
    repo.pool().close().await;

    let err = repo.top(10).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)), "{err:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_from_separate_sessions_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("race.db").display());

    let first = SqliteRepository::connect(&url).await.expect("connect first");
    first.migrate().await.expect("migrate");
    let second = SqliteRepository::connect(&url).await.expect("connect second");

    let repos: [Arc<dyn ScoreRepository>; 2] = [Arc::new(first), Arc::new(second)];
    let bob = name("Bob");

    let (a, b) = tokio::join!(repos[0].upsert_add(&bob, 10), repos[1].upsert_add(&bob, 10));
    a.unwrap();
    b.unwrap();
    assert_eq!(repos[0].score_of(&bob).await.unwrap(), Some(20));

    let mut tasks = JoinSet::new();
    for i in 0..20 {
        let repo = Arc::clone(&repos[i % 2]);
        let bob = bob.clone();
        tasks.spawn(async move { repo.upsert_add(&bob, 10).await });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.expect("task").expect("upsert");
    }

    assert_eq!(repos[1].score_of(&bob).await.unwrap(), Some(220));
    let top = repos[0].top(10).await.unwrap();
    assert_eq!(top.len(), 1);
}
