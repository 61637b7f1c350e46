//! PostgreSQL implementation of the flood event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::FloodEvent;
use crate::domain::repositories::{FloodRepository, FloodStoreError};

/// Flood log stored in the `flood` table.
///
/// Registrations survive restarts and are shared by every process using the
/// same database.
pub struct PgFloodRepository {
    pool: Arc<PgPool>,
}

impl PgFloodRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FloodRepository for PgFloodRepository {
    async fn count_since(
        &self,
        event: &str,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, FloodStoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM flood
            WHERE event = $1 AND identifier = $2 AND timestamp > $3
            "#,
        )
        .bind(event)
        .bind(identifier)
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn register(&self, event: FloodEvent) -> Result<(), FloodStoreError> {
        sqlx::query(
            r#"
            INSERT INTO flood (event, identifier, timestamp, expiration)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&event.event)
        .bind(&event.identifier)
        .bind(event.timestamp)
        .bind(event.expiration)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn clear(&self, event: &str, identifier: &str) -> Result<u64, FloodStoreError> {
        let result = sqlx::query("DELETE FROM flood WHERE event = $1 AND identifier = $2")
            .bind(event)
            .bind(identifier)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn garbage_collect(&self, now: DateTime<Utc>) -> Result<u64, FloodStoreError> {
        let result = sqlx::query("DELETE FROM flood WHERE expiration < $1")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
