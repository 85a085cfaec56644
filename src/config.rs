//! Process configuration loaded once at startup from environment variables.

use std::env;
use std::time::Duration;

use rand::RngCore;

/// Fallback bootstrap credentials, used outside production only.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@jukwaa.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Primary Admin";

/// Runtime configuration shared by all handlers via [`crate::AppState`].
///
/// Read-only after startup; the signing secret in particular is never mutated
/// once the process is up, so unsynchronized concurrent reads are safe.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// HMAC secret for token signing. Generated per-process when `JWT_SECRET`
    /// is unset, which invalidates all outstanding tokens on restart.
    pub jwt_secret: String,
    /// Token time-to-live in seconds, default 12 hours.
    pub token_ttl_secs: i64,
    /// True when `APP_ENV=production`; suppresses the fallback bootstrap admin.
    pub production: bool,
    pub admin_email: Option<String>,
    pub admin_password: String,
    pub admin_name: String,
    /// Store connection acquire timeout, default 30 seconds.
    pub connect_timeout: Duration,
}

impl AppConfig {
    /// Builds the configuration from the environment. Optional values fall
    /// back to development defaults; only `DATABASE_URL` (read separately by
    /// [`crate::db::connect_pg_pool`]) is hard-required.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET not set; using a random per-process secret, \
                 tokens will not survive a restart"
            );
            random_secret()
        });

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(12 * 60 * 60);

        let connect_timeout_secs = env::var("STORE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            jwt_secret,
            token_ttl_secs,
            production: env::var("APP_ENV").as_deref() == Ok("production"),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            admin_name: env::var("ADMIN_NAME").unwrap_or_else(|_| DEFAULT_ADMIN_NAME.to_string()),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        }
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_secrets_differ() {
        assert_ne!(random_secret(), random_secret());
        assert_eq!(random_secret().len(), 64);
    }
}
