//! Generic admin gateway: one route family managing all registered content
//! collections.
//!
//! The target collection is resolved through [`Entity::parse`]; unknown names
//! are a 404, and the three read-only entities reject every mutation with a
//! 403 regardless of caller role. Bulk actions apply the registry's
//! per-entity field transitions and report the number of records actually
//! affected, which may be fewer than the ids supplied.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth_middleware::AdminAuth;
use crate::error::ApiError;
use crate::models::AppState;
use crate::registry::{BulkAction, Entity};
use crate::store::Document;

fn resolve(name: &str) -> Result<Entity, ApiError> {
    Entity::parse(name).ok_or_else(|| ApiError::NotFound("Entity not found".into()))
}

fn require_mutable(entity: Entity) -> Result<(), ApiError> {
    if entity.is_read_only() {
        return Err(ApiError::Forbidden(
            "This entity is read-only in admin".into(),
        ));
    }
    Ok(())
}

fn require_object(payload: &Value) -> Result<(), ApiError> {
    if !payload.is_object() {
        return Err(ApiError::BadRequest("payload must be a JSON object".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    pub ids: Vec<Uuid>,
    #[serde(default)]
    pub action: String,
}

/// `GET /api/admin/{entity}` — all records, newest first.
#[tracing::instrument(skip(auth, state), fields(user_id = %auth.sub))]
pub async fn list_entity(
    auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let entity = resolve(&path)?;
    let docs = state.store.list(entity.name()).await?;
    let items: Vec<Value> = docs.into_iter().map(Document::into_json).collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": items })))
}

/// `POST /api/admin/{entity}` — 201 with the stored record.
#[tracing::instrument(skip(auth, state, payload), fields(user_id = %auth.sub))]
pub async fn create_entity(
    auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let entity = resolve(&path)?;
    require_mutable(entity)?;
    let payload = payload.into_inner();
    require_object(&payload)?;

    let doc = state.store.insert(entity.name(), payload).await?;
    tracing::info!(entity = entity.name(), id = %doc.id, "created record");
    Ok(HttpResponse::Created().json(serde_json::json!({ "data": doc.into_json() })))
}

/// `PUT /api/admin/{entity}/{id}` — partial update, 404 when absent.
#[tracing::instrument(skip(auth, state, payload), fields(user_id = %auth.sub))]
pub async fn update_entity(
    auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let (name, id) = path.into_inner();
    let entity = resolve(&name)?;
    require_mutable(entity)?;
    let payload = payload.into_inner();
    require_object(&payload)?;

    let doc = state
        .store
        .update(entity.name(), id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".into()))?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": doc.into_json() })))
}

/// `DELETE /api/admin/{entity}/{id}` — 404 when absent.
#[tracing::instrument(skip(auth, state), fields(user_id = %auth.sub))]
pub async fn delete_entity(
    auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (name, id) = path.into_inner();
    let entity = resolve(&name)?;
    require_mutable(entity)?;

    if !state.store.delete(entity.name(), id).await? {
        return Err(ApiError::NotFound("Item not found".into()));
    }
    tracing::info!(entity = entity.name(), %id, "deleted record");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": { "success": true } })))
}

/// `POST /api/admin/{entity}/bulk` — delete, publish or unpublish a set of
/// records in one call.
///
/// Bulk actions are not transactional across the set: a mid-batch store
/// failure can leave part of the set updated, and the affected count reports
/// what actually changed, never an all-or-nothing guarantee.
#[tracing::instrument(skip(auth, state, form), fields(user_id = %auth.sub))]
pub async fn bulk_entity(
    auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<BulkRequest>,
) -> Result<HttpResponse, ApiError> {
    let entity = resolve(&path)?;
    if entity.is_read_only() {
        return Err(ApiError::Forbidden(
            "Bulk actions are not allowed for this entity".into(),
        ));
    }
    if form.ids.is_empty() {
        return Err(ApiError::BadRequest("ids array is required".into()));
    }

    let affected = match BulkAction::parse(&form.action) {
        Some(BulkAction::Delete) => state.store.delete_many(entity.name(), &form.ids).await?,
        Some(BulkAction::Publish) | Some(BulkAction::Unpublish) => {
            let publish = form.action == "publish";
            let patch = entity.publish_patch(publish).ok_or_else(|| {
                ApiError::BadRequest("Unsupported bulk action for this entity".into())
            })?;
            state
                .store
                .update_many(entity.name(), &form.ids, patch)
                .await?
        }
        None => {
            return Err(ApiError::BadRequest(
                "Unsupported bulk action for this entity".into(),
            ));
        }
    };

    tracing::info!(
        entity = entity.name(),
        action = %form.action,
        affected_count = affected,
        "bulk action applied"
    );
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": { "affectedCount": affected } })))
}
