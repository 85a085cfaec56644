//! Admin identity subsystem: password hashing, token issuance/verification
//! and the idempotent default-admin bootstrap.

pub mod bootstrap;
pub mod password;
pub mod token;
