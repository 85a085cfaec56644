//! Idempotent default-admin bootstrap, run once at startup.
//!
//! The system must never lock itself out of administration, but must also
//! never materialize a guessable default credential in a live deployment:
//! in production with no `ADMIN_EMAIL` configured this routine logs a
//! warning and creates nothing.

use serde_json::json;

use crate::auth::password::hash_password;
use crate::config::{AppConfig, DEFAULT_ADMIN_EMAIL};
use crate::models::{ADMIN_USERS, AdminUser, Role, normalize_email};
use crate::store::Store;

/// Ensures at least one active admin-role identity exists.
///
/// Policy, in order:
/// 1. Production with no explicit admin email configured: warn and skip.
/// 2. Any admin-role identity already present: do nothing.
/// 3. An identity with the configured email exists but lacks the admin role:
///    promote it in place, marking it active; its password hash is assigned
///    only if it has none, never overwritten.
/// 4. Otherwise create a fresh identity with the configured (or fallback)
///    name, email and password.
pub async fn ensure_default_admin(store: &dyn Store, config: &AppConfig) -> anyhow::Result<()> {
    if config.production && config.admin_email.is_none() {
        tracing::warn!("production mode with no ADMIN_EMAIL set; no admin will be auto-created");
        return Ok(());
    }

    let admin_count = store.count_by_field(ADMIN_USERS, "role", "admin").await?;
    if admin_count > 0 {
        return Ok(());
    }

    let email = normalize_email(
        config
            .admin_email
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_EMAIL),
    );

    if let Some(existing) = store.find_one(ADMIN_USERS, "email", &email).await? {
        let has_hash = existing
            .data
            .get("passwordHash")
            .and_then(|v| v.as_str())
            .is_some_and(|h| !h.is_empty());

        let mut patch = json!({ "role": "admin", "isActive": true });
        if !has_hash {
            patch["passwordHash"] = json!(hash_password(&config.admin_password)?);
        }
        store.update(ADMIN_USERS, existing.id, patch).await?;
        tracing::info!(%email, "promoted existing identity to admin");
        return Ok(());
    }

    let user = AdminUser {
        name: config.admin_name.clone(),
        email: email.clone(),
        password_hash: hash_password(&config.admin_password)?,
        role: Role::Admin,
        is_active: true,
    };
    store.insert(ADMIN_USERS, serde_json::to_value(&user)?).await?;
    tracing::info!(%email, "created default admin identity");
    Ok(())
}
