//! Library entry point for the jukwaa backend.
//!
//! Exports all core modules for use in integration tests and by the main binary.

pub mod auth;
pub mod auth_middleware;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod registry;
pub mod store;

pub use auth_middleware::AdminAuth;
pub use config::AppConfig;
pub use error::ApiError;
pub use logging::{get_subscriber, init_subscriber};
pub use models::AppState;
pub use registry::{BulkAction, Entity};
pub use store::{Document, MemStore, PgStore, Store};
