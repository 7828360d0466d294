use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::server::model::convention::Convention;

pub struct ConventionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConventionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Convention>, DbErr> {
        let convention = entity::prelude::Convention::find_by_id(id).one(self.db).await?;

        Ok(convention.map(Convention::from_entity))
    }

    /// Finds a convention by its public API key, returning it with its API secret.
    pub async fn find_by_api_key(
        &self,
        api_key: &str,
    ) -> Result<Option<(Convention, String)>, DbErr> {
        let convention = entity::prelude::Convention::find()
            .filter(entity::convention::Column::ApiKey.eq(api_key))
            .one(self.db)
            .await?;

        Ok(convention.map(|c| {
            let secret = c.api_secret.clone();
            (Convention::from_entity(c), secret)
        }))
    }

    pub async fn is_manager(&self, convention_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let manager = entity::prelude::ConventionManager::find_by_id((convention_id, user_id))
            .one(self.db)
            .await?;

        Ok(manager.is_some())
    }
}
