//! Domain aggregates and value objects for the leads API.

pub mod lead;
pub mod types;
pub mod user;
