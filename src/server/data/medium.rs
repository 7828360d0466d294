use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::medium::{CreateMediumParams, Medium};

pub struct MediumRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MediumRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateMediumParams) -> Result<Medium, DbErr> {
        let medium = entity::medium::ActiveModel {
            event_id: ActiveValue::Set(params.event_id),
            user_id: ActiveValue::Set(params.user_id),
            title: ActiveValue::Set(params.title),
            filename: ActiveValue::Set(params.filename),
            content_type: ActiveValue::Set(params.source.content_type()),
            url: ActiveValue::Set(params.url),
            thumbnail_url: ActiveValue::Set(params.thumbnail_url),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Medium::from_entity(medium))
    }

    pub async fn by_event(&self, event_id: i32) -> Result<Vec<Medium>, DbErr> {
        let media = entity::prelude::Medium::find()
            .filter(entity::medium::Column::EventId.eq(event_id))
            .order_by_asc(entity::medium::Column::Id)
            .all(self.db)
            .await?;

        Ok(media.into_iter().map(Medium::from_entity).collect())
    }
}
