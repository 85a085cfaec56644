//! Document store boundary for all content collections.
//!
//! Every record in the system is a [`Document`]: an opaque JSON object plus an
//! id and timestamps, filed under a collection name. The [`Store`] trait is the
//! only surface the handlers talk to; [`PgStore`] backs it with a single
//! Postgres `documents` table and [`MemStore`] provides a hermetic in-memory
//! implementation for the test suites.

mod memory;
mod pg;

pub use memory::MemStore;
pub use pg::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by store operations. Connectivity and write failures are
/// reported to callers as a generic 500; the variant detail stays in the logs.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One stored record: free-form JSON payload plus store-managed metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub collection: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Flattens the document into its public JSON form: the payload fields at
    /// the top level with `id`, `createdAt` and `updatedAt` merged in.
    pub fn into_json(self) -> Value {
        let mut obj = match self.data {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        obj.insert("id".into(), serde_json::json!(self.id));
        obj.insert("createdAt".into(), serde_json::json!(self.created_at));
        obj.insert("updatedAt".into(), serde_json::json!(self.updated_at));
        Value::Object(obj)
    }
}

/// Asynchronous document store keyed by collection name.
///
/// `update` and `update_many` apply a shallow merge of the patch object into
/// the stored payload (unknown ids are skipped, not errors). `find_one` and
/// `count_by_field` compare the named top-level field against its text form,
/// mirroring Postgres `data->>field`.
#[async_trait]
pub trait Store: Send + Sync {
    /// All documents in a collection, newest first.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn count_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<u64, StoreError>;

    /// Inserts a new document, returning the stored form with generated id and
    /// timestamps.
    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError>;

    /// Merges `patch` into the document's payload. Returns `None` if no
    /// document matches the id.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> Result<Option<Document>, StoreError>;

    /// Applies `patch` to every matching document, returning the number
    /// actually updated (may be less than `ids.len()`).
    async fn update_many(
        &self,
        collection: &str,
        ids: &[Uuid],
        patch: Value,
    ) -> Result<u64, StoreError>;

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    /// Removes every matching document, returning the number actually removed.
    async fn delete_many(&self, collection: &str, ids: &[Uuid]) -> Result<u64, StoreError>;
}
