use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::record::{
    CreateRecordParams, RecordValue, UpdateRecordParams, UserRecord,
};

pub struct UserRecordRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRecordRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a record. A second record with the same key violates the unique index.
    pub async fn create(&self, params: CreateRecordParams) -> Result<UserRecord, DbErr> {
        let now = Utc::now();
        let record = entity::user_record::ActiveModel {
            convention_id: ActiveValue::Set(params.convention_id),
            user_id: ActiveValue::Set(params.user_id),
            descriptor: ActiveValue::Set(params.descriptor),
            content_type: ActiveValue::Set(params.content_type),
            data: ActiveValue::Set(params.data),
            acl: ActiveValue::Set(params.acl.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        UserRecord::from_entity(record)
    }

    pub async fn find(
        &self,
        convention_id: i32,
        user_id: i32,
        descriptor: &str,
    ) -> Result<Option<UserRecord>, DbErr> {
        entity::prelude::UserRecord::find()
            .filter(entity::user_record::Column::ConventionId.eq(convention_id))
            .filter(entity::user_record::Column::UserId.eq(user_id))
            .filter(entity::user_record::Column::Descriptor.eq(descriptor))
            .one(self.db)
            .await?
            .map(UserRecord::from_entity)
            .transpose()
    }

    pub async fn update(&self, id: i32, params: UpdateRecordParams) -> Result<UserRecord, DbErr> {
        let record = entity::user_record::ActiveModel {
            id: ActiveValue::Unchanged(id),
            content_type: ActiveValue::Set(params.content_type),
            data: ActiveValue::Set(params.data),
            acl: match params.acl {
                Some(acl) => ActiveValue::Set(acl.as_str().to_string()),
                None => ActiveValue::NotSet,
            },
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        UserRecord::from_entity(record)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::UserRecord::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Distinct descriptors used in the convention, sorted.
    pub async fn list_descriptors(&self, convention_id: i32) -> Result<Vec<String>, DbErr> {
        entity::prelude::UserRecord::find()
            .select_only()
            .column(entity::user_record::Column::Descriptor)
            .distinct()
            .filter(entity::user_record::Column::ConventionId.eq(convention_id))
            .order_by_asc(entity::user_record::Column::Descriptor)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Every user's record for a descriptor in the convention, with the owner's email.
    pub async fn all_by_descriptor(
        &self,
        convention_id: i32,
        descriptor: &str,
    ) -> Result<Vec<RecordValue>, DbErr> {
        let rows = entity::prelude::UserRecord::find()
            .find_also_related(entity::prelude::User)
            .filter(entity::user_record::Column::ConventionId.eq(convention_id))
            .filter(entity::user_record::Column::Descriptor.eq(descriptor))
            .order_by_asc(entity::user_record::Column::Id)
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(record, user)| {
                Ok(RecordValue {
                    user_email: user.map(|u| u.email).unwrap_or_default(),
                    record: UserRecord::from_entity(record)?,
                })
            })
            .collect()
    }
}
