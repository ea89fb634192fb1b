//! Pool and migration behavior against a file-backed database.
//!
//! The other suites run in memory; this one checks that a database file is
//! created on first connect, migrations are idempotent, and data survives a
//! reconnect.

use scrawl_core::NoteRepository;
use scrawl_db::test_fixtures::TestDataBuilder;
use scrawl_db::{Database, PoolConfig};

#[tokio::test]
async fn test_connect_creates_file_and_migrates() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scrawl_test.db");
    let url = format!("sqlite://{}", path.display());

    let db = Database::connect_with_config(&url, PoolConfig::new().max_connections(2))
        .await
        .expect("Failed to connect");
    db.migrate().await.expect("Failed to run migrations");
    db.migrate().await.expect("Migrations must be idempotent");

    assert!(path.exists());
    assert_eq!(db.notes.count().await.expect("Failed to count notes"), 0);
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scrawl_test.db");
    let url = format!("sqlite://{}", path.display());

    {
        let db = Database::connect(&url).await.expect("Failed to connect");
        db.migrate().await.expect("Failed to run migrations");
        TestDataBuilder::new(&db)
            .with_user("author")
            .with_note("author", "Durable", "Text", Some("durable"))
            .build()
            .await;
        db.pool().close().await;
    }

    let db = Database::connect(&url).await.expect("Failed to reconnect");
    assert_eq!(db.notes.count().await.expect("Failed to count notes"), 1);
}
