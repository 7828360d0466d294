//! Identity and token models of the login flow.

use chrono::{DateTime, Utc};

/// Identity returned by an authentication provider's user info endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderIdentity {
    /// Provider-side subject id.
    pub subject: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn from_entity(entity: entity::auth_token::Model) -> Self {
        Self {
            token: entity.token,
            user_id: entity.user_id,
            expires_at: entity.expires_at,
        }
    }
}
