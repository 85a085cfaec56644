//! Core data models and shared application state.
//!
//! Administrator identities are stored as documents in the `admin-users`
//! collection; [`AdminUser`] is the payload shape and [`AdminUserView`] the
//! redacted form every read path returns (the password hash never leaves the
//! server).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::token::TokenIssuer;
use crate::config::AppConfig;
use crate::db;
use crate::store::{Document, PgStore, Store};

/// Collection holding administrator identities.
pub const ADMIN_USERS: &str = "admin-users";

/// Application-level roles carried in token claims.
///
/// Unrecognized role strings map to the least-privileged role.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

/// Stored payload of one administrator identity.
///
/// Serialized in camelCase to match the wire format of the content documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Redacted identity returned by every user-management read path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUserView {
    /// Builds the redacted view from a stored document. Returns `None` when
    /// the payload does not parse as an identity record.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let user: AdminUser = serde_json::from_value(doc.data.clone()).ok()?;
        Some(Self {
            id: doc.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

/// Lowercases and trims an email so lookups and uniqueness checks are
/// case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Shared application state for all handlers.
///
/// Holds the document store, the token issuer/verifier and the startup
/// configuration. All three are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenIssuer,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Production constructor: reads configuration from the environment,
    /// connects the Postgres-backed store and runs pending migrations.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let pool = db::connect_pg_pool(config.connect_timeout).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::with_store(Arc::new(PgStore::new(pool)), config))
    }

    /// Assembles state around an existing store, used by `new` and by the
    /// test suites with an in-memory store.
    pub fn with_store(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs);
        Self {
            store,
            tokens,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_falls_back_to_least_privileged() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from("superuser"), Role::User);
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Admin@Jukwaa.LOCAL "),
            "admin@jukwaa.local"
        );
    }

    #[test]
    fn view_redacts_password_hash() {
        let doc = Document {
            id: Uuid::new_v4(),
            collection: ADMIN_USERS.to_string(),
            data: serde_json::json!({
                "name": "Ops",
                "email": "ops@jukwaa.local",
                "passwordHash": "aa:bb",
                "role": "admin",
                "isActive": true,
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = AdminUserView::from_document(&doc).unwrap();
        assert_eq!(view.role, Role::Admin);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "ops@jukwaa.local");
    }
}
