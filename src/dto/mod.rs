//! DTOs bridging the HTTP boundary with services and the domain.

pub mod auth;
pub mod lead;
