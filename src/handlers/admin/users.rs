//! Administrator identity management, gated to the `admin` role.
//!
//! Stricter than the generic entity surface: every operation here requires
//! the admin role, emails are normalized and kept unique, and the password
//! hash is redacted from every response via [`AdminUserView`].

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::auth_middleware::AdminAuth;
use crate::error::ApiError;
use crate::handlers::admin::guard::admin_guard;
use crate::models::{ADMIN_USERS, AdminUser, AdminUserView, AppState, Role, normalize_email};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

/// `GET /api/admin/users`
#[tracing::instrument(skip(auth, state), fields(admin_id = %auth.sub))]
pub async fn get_users(
    auth: AdminAuth,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    admin_guard(&auth)?;
    let docs = state.store.list(ADMIN_USERS).await?;
    let users: Vec<AdminUserView> = docs.iter().filter_map(AdminUserView::from_document).collect();
    tracing::info!(user_count = users.len(), "admin fetched user list");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": users })))
}

/// `POST /api/admin/users`
///
/// 400 on missing/blank required fields, 409 on a duplicate email.
#[tracing::instrument(skip(auth, state, form), fields(admin_id = %auth.sub))]
pub async fn create_user(
    auth: AdminAuth,
    state: web::Data<AppState>,
    form: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    admin_guard(&auth)?;
    if let Err(e) = form.validate() {
        return Err(ApiError::BadRequest(e.to_string()));
    }

    let name = form.name.trim().to_string();
    let email = normalize_email(&form.email);
    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(ApiError::BadRequest(
            "name, email and password are required".into(),
        ));
    }

    if state
        .store
        .find_one(ADMIN_USERS, "email", &email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let password = form.password.clone();
    let password_hash = web::block(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;

    let user = AdminUser {
        name,
        email: email.clone(),
        password_hash,
        role: form.role.unwrap_or_default(),
        is_active: form.is_active.unwrap_or(true),
    };
    let doc = state
        .store
        .insert(
            ADMIN_USERS,
            serde_json::to_value(&user).map_err(|e| ApiError::Internal(e.into()))?,
        )
        .await?;

    let view = AdminUserView::from_document(&doc)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("stored identity failed to parse")))?;
    tracing::info!(%email, "admin created identity");
    Ok(HttpResponse::Created().json(serde_json::json!({ "data": view })))
}

/// `PUT /api/admin/users/{id}`
///
/// Partial update; 404 if no identity matches the id, 409 if the new email
/// belongs to a different identity. A supplied password is re-hashed; the
/// stored hash is otherwise untouched.
#[tracing::instrument(skip(auth, state, form), fields(admin_id = %auth.sub, target = %path))]
pub async fn update_user(
    auth: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    admin_guard(&auth)?;
    let id = path.into_inner();

    let mut patch = serde_json::Map::new();
    if let Some(name) = &form.name {
        patch.insert("name".into(), serde_json::json!(name.trim()));
    }
    if let Some(email) = &form.email {
        let email = normalize_email(email);
        if let Some(existing) = state.store.find_one(ADMIN_USERS, "email", &email).await? {
            if existing.id != id {
                return Err(ApiError::Conflict("User already exists".into()));
            }
        }
        patch.insert("email".into(), serde_json::json!(email));
    }
    if let Some(role) = form.role {
        patch.insert("role".into(), serde_json::json!(role));
    }
    if let Some(is_active) = form.is_active {
        patch.insert("isActive".into(), serde_json::json!(is_active));
    }
    if let Some(password) = form.password.clone().filter(|p| !p.is_empty()) {
        let hash = web::block(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?
            .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
        patch.insert("passwordHash".into(), serde_json::json!(hash));
    }

    let doc = state
        .store
        .update(ADMIN_USERS, id, serde_json::Value::Object(patch))
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let view = AdminUserView::from_document(&doc)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("stored identity failed to parse")))?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": view })))
}
