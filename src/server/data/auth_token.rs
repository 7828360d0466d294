use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::auth::AuthToken;

pub struct AuthTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        token: String,
        user_id: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<AuthToken, DbErr> {
        let token = entity::auth_token::ActiveModel {
            token: ActiveValue::Set(token),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            expires_at: ActiveValue::Set(expires_at),
        }
        .insert(self.db)
        .await?;

        Ok(AuthToken::from_entity(token))
    }

    /// Finds a token that has not expired at `now`.
    pub async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthToken>, DbErr> {
        let token = entity::prelude::AuthToken::find_by_id(token.to_string())
            .filter(entity::auth_token::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await?;

        Ok(token.map(AuthToken::from_entity))
    }

    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AuthToken::delete_many()
            .filter(entity::auth_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
