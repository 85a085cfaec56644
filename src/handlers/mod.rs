//! Handler module organization for the backend API.

pub mod admin;
pub mod health;
