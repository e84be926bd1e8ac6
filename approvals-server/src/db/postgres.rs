//! PostgreSQL request store
//!
//! Treats one table as a document collection: every request is a JSONB
//! document keyed by a database-generated UUID.
//! - insert: id comes from `gen_random_uuid()` via RETURNING
//! - replace/remove: not-found is read off the affected-row count

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::store::{RequestStore, StoreError};
use crate::models::{Request, RequestBody, RequestId};

/// Request store backed by a `requests` table in PostgreSQL.
#[derive(Clone)]
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the collection table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Preparing requests collection...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS requests (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn decode_row(row: PgRow) -> Result<Request, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let document: serde_json::Value = row.try_get("document")?;
    let body: RequestBody = serde_json::from_value(document)?;
    Ok(Request::from_body(RequestId::from(id), body))
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn list(&self) -> Result<Vec<Request>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            r#"
            SELECT id, document
            FROM requests
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter().map(decode_row).collect()
    }

    async fn insert(&self, body: RequestBody) -> Result<RequestId, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO requests (document) VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(Json(&body))
        .fetch_one(&mut *conn)
        .await?;

        Ok(RequestId::from(id))
    }

    async fn get(&self, id: RequestId) -> Result<Request, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(
            r#"
            SELECT id, document
            FROM requests
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        decode_row(row)
    }

    async fn replace(&self, id: RequestId, body: RequestBody) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("UPDATE requests SET document = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(Json(&body))
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }

    async fn remove(&self, id: RequestId) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}
