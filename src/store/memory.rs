//! In-memory [`Store`] used by the integration and unit test suites.
//!
//! Behavior mirrors [`super::PgStore`]: shallow-merge patches, text-form field
//! comparison, newest-first listing. Locks are never held across await points.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{Document, Store, StoreError};

#[derive(Debug, Default)]
pub struct MemStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Text form of a top-level payload field, matching Postgres `data->>field`.
fn field_as_text(data: &Value, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn merge_patch(data: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(source)) = (data, patch) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl Store for MemStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        let mut docs = collections.get(collection).cloned().unwrap_or_default();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| field_as_text(&d.data, field).as_deref() == Some(value))
                .cloned()
        }))
    }

    async fn count_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<u64, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| field_as_text(&d.data, field).as_deref() == Some(value))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            collection: collection.to_string(),
            data,
            created_at: now,
            updated_at: now,
        };
        let mut collections = self.collections.write().expect("store lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Value,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(doc) = docs.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        merge_patch(&mut doc.data, &patch);
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn update_many(
        &self,
        collection: &str,
        ids: &[Uuid],
        patch: Value,
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let mut affected = 0;
        for doc in docs.iter_mut().filter(|d| ids.contains(&d.id)) {
            merge_patch(&mut doc.data, &patch);
            doc.updated_at = Utc::now();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn delete_many(&self, collection: &str, ids: &[Uuid]) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !ids.contains(&d.id));
        Ok((before - docs.len()) as u64)
    }
}
