//! Database models and server-level data shared across the API.

pub mod auth;
pub mod config;
pub mod lead;
pub mod user;
