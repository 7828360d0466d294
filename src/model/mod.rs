//! Data transfer objects shared by the HTTP API.
//!
//! DTOs are the serialization boundary of the server: controllers convert domain models
//! into these types before responding. JSON keys are kebab-case throughout.

pub mod api;
pub mod auth;
pub mod record;
pub mod sale;
pub mod user;
