use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_purger::domain::entities::FloodEvent;
use url_purger::domain::repositories::FloodRepository;
use url_purger::infrastructure::flood::PgFloodRepository;

fn event(identifier: &str, offset_secs: i64, window_secs: i64) -> FloodEvent {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::seconds(offset_secs);
    FloodEvent::new("purge", identifier, now, Duration::seconds(window_secs))
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_register_and_count(pool: PgPool) {
    let repo = PgFloodRepository::new(Arc::new(pool));

    repo.register(event("admin", 0, 3600)).await.unwrap();
    repo.register(event("admin", 10, 3600)).await.unwrap();
    repo.register(event("other", 10, 3600)).await.unwrap();

    let since = event("admin", -1, 0).timestamp;
    let count = repo.count_since("purge", "admin", since).await.unwrap();

    assert_eq!(count, 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_count_excludes_boundary(pool: PgPool) {
    let repo = PgFloodRepository::new(Arc::new(pool));

    let first = event("admin", 0, 3600);
    repo.register(first.clone()).await.unwrap();
    repo.register(event("admin", 5, 3600)).await.unwrap();

    let count = repo
        .count_since("purge", "admin", first.timestamp)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_clear(pool: PgPool) {
    let repo = PgFloodRepository::new(Arc::new(pool));

    repo.register(event("admin", 0, 3600)).await.unwrap();
    repo.register(event("admin", 1, 3600)).await.unwrap();
    repo.register(event("other", 1, 3600)).await.unwrap();

    let removed = repo.clear("purge", "admin").await.unwrap();
    assert_eq!(removed, 2);

    let since = event("admin", -1, 0).timestamp;
    assert_eq!(repo.count_since("purge", "admin", since).await.unwrap(), 0);
    assert_eq!(repo.count_since("purge", "other", since).await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_garbage_collect(pool: PgPool) {
    let repo = PgFloodRepository::new(Arc::new(pool));

    repo.register(event("admin", 0, 60)).await.unwrap();
    repo.register(event("admin", 0, 3600)).await.unwrap();

    let now = event("admin", 120, 0).timestamp;
    let removed = repo.garbage_collect(now).await.unwrap();

    assert_eq!(removed, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgFloodRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
