//! User domain model.

use chrono::{DateTime, Utc};

use crate::model::user::UserDto;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            phone: entity.phone,
            created_at: entity.created_at,
        }
    }

    /// Converts domain model to DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            phone: self.phone,
            created_at: self.created_at,
        }
    }

    /// Splits the display name into first name and the rest.
    pub fn first_last_name(&self) -> (String, String) {
        match self.name.trim().split_once(' ') {
            Some((first, last)) => (first.to_string(), last.trim().to_string()),
            None => (self.name.trim().to_string(), String::new()),
        }
    }
}

/// Parameters for creating or refreshing a user from a provider identity.
#[derive(Debug, Clone)]
pub struct UpsertUserParams {
    pub email: String,
    pub name: String,
}
