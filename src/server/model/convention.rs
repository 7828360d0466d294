//! Convention domain model and request-level convention access.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Convention {
    pub id: i32,
    pub title: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

impl Convention {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// The API secret never leaves the data layer.
    pub fn from_entity(entity: entity::convention::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            api_key: entity.api_key,
            created_at: entity.created_at,
        }
    }
}

/// The convention a request acts on, and whether it proved knowledge of the API secret.
#[derive(Debug, Clone, PartialEq)]
pub struct ConventionAccess {
    pub convention: Convention,
    pub authorized: bool,
}
