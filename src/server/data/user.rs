use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::user::{UpsertUserParams, User};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let user = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(user.map(User::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let user = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(user.map(User::from_entity))
    }

    /// Creates the user or refreshes the name of the existing user with the same email.
    pub async fn upsert(&self, params: UpsertUserParams) -> Result<User, DbErr> {
        let existing = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(&params.email))
            .one(self.db)
            .await?;

        let user = match existing {
            Some(user) if user.name == params.name => user,
            Some(user) => {
                let mut active: entity::user::ActiveModel = user.into();
                active.name = ActiveValue::Set(params.name);
                active.update(self.db).await?
            }
            None => {
                entity::user::ActiveModel {
                    email: ActiveValue::Set(params.email),
                    name: ActiveValue::Set(params.name),
                    phone: ActiveValue::Set(None),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(User::from_entity(user))
    }
}
