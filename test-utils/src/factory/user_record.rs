//! User record factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test user records.
///
/// # Example
///
/// ```rust,ignore
/// let record = UserRecordFactory::new(&db, convention.id, user.id, "profile")
///     .acl("public")
///     .data(r#"{"nick":"x"}"#)
///     .build()
///     .await?;
/// ```
pub struct UserRecordFactory<'a> {
    db: &'a DatabaseConnection,
    convention_id: i32,
    user_id: i32,
    descriptor: String,
    content_type: String,
    data: String,
    acl: String,
}

impl<'a> UserRecordFactory<'a> {
    /// Creates a new UserRecordFactory.
    ///
    /// Defaults to a private `application/json` record holding `{}`.
    pub fn new(
        db: &'a DatabaseConnection,
        convention_id: i32,
        user_id: i32,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            db,
            convention_id,
            user_id,
            descriptor: descriptor.into(),
            content_type: "application/json".to_string(),
            data: "{}".to_string(),
            acl: "private".to_string(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = acl.into();
        self
    }

    /// Builds and inserts the user record entity into the database.
    pub async fn build(self) -> Result<entity::user_record::Model, DbErr> {
        let now = Utc::now();
        entity::user_record::ActiveModel {
            convention_id: ActiveValue::Set(self.convention_id),
            user_id: ActiveValue::Set(self.user_id),
            descriptor: ActiveValue::Set(self.descriptor),
            content_type: ActiveValue::Set(self.content_type),
            data: ActiveValue::Set(self.data),
            acl: ActiveValue::Set(self.acl),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a private JSON record with default content.
pub async fn create_user_record(
    db: &DatabaseConnection,
    convention_id: i32,
    user_id: i32,
    descriptor: impl Into<String>,
) -> Result<entity::user_record::Model, DbErr> {
    UserRecordFactory::new(db, convention_id, user_id, descriptor)
        .build()
        .await
}
