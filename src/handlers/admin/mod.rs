//! Admin handler organization and route configuration.
//!
//! Literal routes (`/login`, `/logout`, `/me`, `/users`) are registered
//! before the generic `/{entity}` family so they always win the match; an
//! entity name outside the registry then falls through to a 404.

pub mod auth;
pub mod entities;
pub mod guard;
pub mod users;

use actix_web::web;

use crate::error::ApiError;

/// Configures all administrative routes under the `/api/admin` scope.
///
/// `/login` is the only route reachable without a bearer token; everything
/// else goes through the auth extractor, and the user-management routes
/// additionally require the `admin` role.
///
/// Extractor failures (unparseable JSON bodies, malformed record ids) are
/// mapped into [`ApiError::BadRequest`] so they render the same
/// `{"message": ...}` envelope as handler-level validation.
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
            )
            // Authentication
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me))
            // User management (admin role only)
            .route("/users", web::get().to(users::get_users))
            .route("/users", web::post().to(users::create_user))
            .route("/users/{id}", web::put().to(users::update_user))
            // Generic entity management
            .route("/{entity}", web::get().to(entities::list_entity))
            .route("/{entity}", web::post().to(entities::create_entity))
            .route("/{entity}/bulk", web::post().to(entities::bulk_entity))
            .route("/{entity}/{id}", web::put().to(entities::update_entity))
            .route("/{entity}/{id}", web::delete().to(entities::delete_entity)),
    );
}
