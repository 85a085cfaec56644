//! Database connection utilities.
//!
//! Provides the Postgres connection pool behind [`crate::store::PgStore`],
//! with an explicit acquire timeout so a degraded database never hangs
//! startup indefinitely.

use std::env;
use std::time::Duration;

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects a pool using the `DATABASE_URL` environment variable.
pub async fn connect_pg_pool(connect_timeout: Duration) -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(connect_timeout)
        .connect(&database_url)
        .await
        .context("failed to create Postgres pool")
}
