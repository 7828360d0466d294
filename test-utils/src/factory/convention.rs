//! Convention factory, including convention manager assignment.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test conventions.
///
/// # Example
///
/// ```rust,ignore
/// let convention = ConventionFactory::new(&db)
///     .api_key("con-key")
///     .api_secret("con-secret")
///     .build()
///     .await?;
/// ```
pub struct ConventionFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    api_key: String,
    api_secret: String,
}

impl<'a> ConventionFactory<'a> {
    /// Creates a new ConventionFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Convention {id}"`
    /// - api_key: `"key-{id}"`
    /// - api_secret: `"secret-{id}"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Convention {}", id),
            api_key: format!("key-{}", id),
            api_secret: format!("secret-{}", id),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = api_secret.into();
        self
    }

    /// Builds and inserts the convention entity into the database.
    pub async fn build(self) -> Result<entity::convention::Model, DbErr> {
        entity::convention::ActiveModel {
            title: ActiveValue::Set(self.title),
            api_key: ActiveValue::Set(self.api_key),
            api_secret: ActiveValue::Set(self.api_secret),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a convention with default values.
pub async fn create_convention(
    db: &DatabaseConnection,
) -> Result<entity::convention::Model, DbErr> {
    ConventionFactory::new(db).build().await
}

/// Makes the user a manager of the convention.
pub async fn add_manager(
    db: &DatabaseConnection,
    convention_id: i32,
    user_id: i32,
) -> Result<entity::convention_manager::Model, DbErr> {
    entity::convention_manager::ActiveModel {
        convention_id: ActiveValue::Set(convention_id),
        user_id: ActiveValue::Set(user_id),
    }
    .insert(db)
    .await
}
