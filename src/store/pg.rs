//! Postgres-backed [`Store`] implementation.
//!
//! All collections share one `documents` table (see `migrations/`); the
//! payload lives in a `jsonb` column so the store stays schema-free the way
//! the admin gateway expects. Patches use the `jsonb ||` shallow-merge
//! operator, which matches the partial-update semantics of [`Store::update`].

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Document, Store, StoreError};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let docs = sqlx::query_as::<_, Document>(
            "SELECT id, collection, data, created_at, updated_at
             FROM documents WHERE collection = $1
             ORDER BY created_at DESC",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            "SELECT id, collection, data, created_at, updated_at
             FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            "SELECT id, collection, data, created_at, updated_at
             FROM documents WHERE collection = $1 AND data->>$2 = $3
             LIMIT 1",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn count_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE collection = $1 AND data->>$2 = $3",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            "INSERT INTO documents (collection, data) VALUES ($1, $2)
             RETURNING id, collection, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> Result<Option<Document>, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            "UPDATE documents SET data = data || $3, updated_at = now()
             WHERE collection = $1 AND id = $2
             RETURNING id, collection, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(id)
        .bind(patch)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn update_many(
        &self,
        collection: &str,
        ids: &[Uuid],
        patch: Value,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = now()
             WHERE collection = $1 AND id = ANY($2)",
        )
        .bind(collection)
        .bind(ids)
        .bind(patch)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, collection: &str, ids: &[Uuid]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = ANY($2)")
            .bind(collection)
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
