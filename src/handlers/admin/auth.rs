//! Admin authentication endpoints: login, logout and current identity.
//!
//! Login validates credentials against the stored identity record and issues
//! a bearer token. Every failure mode (unknown email, inactive identity, bad
//! password) answers with the same 401 so the endpoint cannot be used as an
//! account oracle. Logout is acknowledged but performs no server-side state
//! change; tokens remain valid until natural expiry.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::Span;
use validator::Validate;

use crate::auth::password::verify_password;
use crate::auth::token;
use crate::auth_middleware::AdminAuth;
use crate::error::ApiError;
use crate::models::{ADMIN_USERS, AdminUser, AppState, normalize_email};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// `POST /api/admin/login`
///
/// Returns `{ data: { token, user } }` on success; 401 on bad credentials or
/// an inactive identity. Password verification runs on the blocking pool.
#[tracing::instrument(skip(state, form), fields(user_id = tracing::field::Empty))]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(e) = form.validate() {
        return Err(ApiError::BadRequest(e.to_string()));
    }

    let email = normalize_email(&form.email);
    let doc = state
        .store
        .find_one(ADMIN_USERS, "email", &email)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    let user: AdminUser =
        serde_json::from_value(doc.data.clone()).map_err(|_| ApiError::Unauthorized)?;
    if !user.is_active {
        tracing::warn!(%email, "login attempt for inactive identity");
        return Err(ApiError::Unauthorized);
    }

    let password = form.password.clone();
    let hash = user.password_hash.clone();
    let verified = web::block(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
    if !verified {
        tracing::warn!(%email, "login attempt with bad password");
        return Err(ApiError::Unauthorized);
    }

    let token = state
        .tokens
        .issue(doc.id, &user)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;

    Span::current().record("user_id", doc.id.to_string());
    tracing::info!(%email, "admin login succeeded");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "data": {
            "token": token,
            "user": {
                "id": doc.id,
                "name": user.name,
                "email": user.email,
                "role": user.role,
            }
        }
    })))
}

/// `POST /api/admin/logout`
///
/// Acknowledges the logout. Revocation is a documented no-op; the presented
/// token stays valid until it expires.
pub async fn logout(auth: AdminAuth) -> HttpResponse {
    token::revoke(&auth.token);
    HttpResponse::Ok().json(serde_json::json!({ "data": { "success": true } }))
}

/// `GET /api/admin/me`
///
/// Echoes the caller's claims as embedded in the token.
pub async fn me(auth: AdminAuth) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "data": {
            "id": auth.sub,
            "email": auth.email,
            "name": auth.name,
            "role": auth.role,
        }
    }))
}
