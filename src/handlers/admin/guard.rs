//! Role guard for admin-only operations.
//!
//! The auth middleware only proves a request carries a valid token; this
//! guard additionally requires the `admin` role. Call it at the top of every
//! handler that manages identities.

use crate::auth_middleware::AdminAuth;
use crate::error::ApiError;
use crate::models::Role;

pub fn is_admin(auth: &AdminAuth) -> bool {
    auth.role == Role::Admin
}

/// Returns `Err(Forbidden)` unless the caller's claims carry the admin role.
pub fn admin_guard(auth: &AdminAuth) -> Result<(), ApiError> {
    if is_admin(auth) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".into()))
    }
}
