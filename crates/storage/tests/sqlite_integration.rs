use quiz_core::model::PersistedProgress;
use storage::repository::{ProgressRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn build_progress() -> PersistedProgress {
    let mut progress = PersistedProgress::default();
    progress.add_points("Science", 10);
    progress.record_answer("Science", 0, true);
    progress.record_answer("Science", 1, false);
    progress.ensure_sections(["Science", "History"]);
    progress
}

#[tokio::test]
async fn sqlite_round_trips_snapshot() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_progress().await.expect("load").is_none());

    let progress = build_progress();
    repo.save_progress(&progress).await.expect("save");

    let loaded = repo.load_progress().await.expect("load").expect("snapshot");
    assert_eq!(loaded, progress);
    assert_eq!(loaded.score("History"), 0);
}

#[tokio::test]
async fn sqlite_save_overwrites_single_key() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut progress = build_progress();
    repo.save_progress(&progress).await.expect("save");

    progress.add_points("Science", 13);
    progress.record_answer("Science", 1, true);
    repo.save_progress(&progress).await.expect("save again");

    let loaded = repo.load_progress().await.expect("load").expect("snapshot");
    assert_eq!(loaded.score("Science"), 23);
    assert_eq!(loaded.correct_count("Science"), 2);

    let row_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress")
        .fetch_one(repo.pool())
        .await
        .expect("count");
    assert_eq!(row_count, 1);
}

#[tokio::test]
async fn sqlite_rejects_malformed_snapshot() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_malformed?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    sqlx::query("INSERT INTO progress (key, value, updated_at) VALUES ('quiz-progress', 'not json', '2024-01-01')")
        .execute(repo.pool())
        .await
        .expect("insert garbage");

    let err = repo.load_progress().await.expect_err("malformed value");
    assert!(matches!(err, StorageError::Serialization(_)));
}
