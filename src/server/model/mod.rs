//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod auth;
pub mod convention;
pub mod medium;
pub mod pass;
pub mod record;
pub mod sale;
pub mod status;
pub mod ticket;
pub mod user;
