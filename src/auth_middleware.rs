//! Authentication middleware extracting admin claims from a bearer token.
//!
//! # Overview
//! [`AdminAuth`] is an Actix Web extractor: add it as a handler argument and
//! the request must carry `Authorization: Bearer <token>` with a token that
//! verifies against the process signing secret. The decoded [`Claims`] are
//! available through `Deref`; the raw token is kept for the logout path.
//!
//! # Errors
//! Any failure (missing header, wrong scheme, malformed/expired/forged token)
//! is a uniform 401 with no detail about which check failed, and no downstream
//! handler runs.

use std::future::{Ready, ready};
use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, web};
use tracing::Span;

use crate::auth::token::Claims;
use crate::error::ApiError;
use crate::models::AppState;

/// Verified admin claims for the current request.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub claims: Claims,
    pub token: String,
}

impl Deref for AdminAuth {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.claims
    }
}

impl FromRequest for AdminAuth {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<AdminAuth, ApiError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState missing from request data");
        return Err(ApiError::Unauthorized);
    };

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            tracing::warn!("missing or malformed Authorization header");
            ApiError::Unauthorized
        })?
        .to_string();

    let claims = state.tokens.verify(&token).ok_or_else(|| {
        tracing::warn!("bearer token failed verification");
        ApiError::Unauthorized
    })?;

    Span::current().record("user_id", claims.sub.to_string());
    Ok(AdminAuth { claims, token })
}
