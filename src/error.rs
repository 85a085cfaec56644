//! Crate-wide API error taxonomy.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; the `ResponseError`
//! impl maps each variant to a status code and a `{"message": ...}` JSON body.
//! Infrastructure failures (store, hashing) collapse to a generic 500 body so
//! internal error text never reaches a caller, while the full cause is logged
//! server-side.

use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, expired or otherwise invalid credentials.
    /// Deliberately carries no detail about which check failed.
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Server error")]
    Store(#[from] StoreError),
    #[error("Server error")]
    Internal(#[source] anyhow::Error),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = ?self, "request failed with server error");
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": self.to_string() }))
    }
}
