use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pass::{Pass, UserPass},
    status::SaleItemStatus,
};

/// Pass definitions.
pub struct PassRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PassRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Pass>, DbErr> {
        let pass = entity::prelude::Pass::find_by_id(id).one(self.db).await?;

        Ok(pass.map(Pass::from_entity))
    }
}

/// Passes owned by users.
pub struct UserPassRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserPassRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a reserved user pass.
    pub async fn create(
        &self,
        user_id: i32,
        pass_id: i32,
        name: String,
        price: f64,
    ) -> Result<UserPass, DbErr> {
        let user_pass = entity::user_pass::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            pass_id: ActiveValue::Set(pass_id),
            sale_id: ActiveValue::Set(None),
            name: ActiveValue::Set(name),
            price: ActiveValue::Set(price),
            status: ActiveValue::Set(SaleItemStatus::Reserved.as_str().to_string()),
            reserved_time: ActiveValue::Set(Utc::now()),
            cancel_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        UserPass::from_entity(user_pass)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserPass>, DbErr> {
        entity::prelude::UserPass::find_by_id(id)
            .one(self.db)
            .await?
            .map(UserPass::from_entity)
            .transpose()
    }

    /// Writes a new status, and the cancel reason when one is given.
    pub async fn update_status(
        &self,
        id: i32,
        status: SaleItemStatus,
        cancel_reason: Option<String>,
    ) -> Result<UserPass, DbErr> {
        let user_pass = entity::user_pass::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(status.as_str().to_string()),
            cancel_reason: match cancel_reason {
                Some(reason) => ActiveValue::Set(Some(reason)),
                None => ActiveValue::NotSet,
            },
            ..Default::default()
        }
        .update(self.db)
        .await?;

        UserPass::from_entity(user_pass)
    }

    pub async fn set_price(&self, id: i32, price: f64) -> Result<UserPass, DbErr> {
        let user_pass = entity::user_pass::ActiveModel {
            id: ActiveValue::Unchanged(id),
            price: ActiveValue::Set(price),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        UserPass::from_entity(user_pass)
    }

    /// Attaches the passes to a sale.
    pub async fn set_sale(&self, ids: Vec<i32>, sale_id: i32) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::UserPass::update_many()
            .col_expr(entity::user_pass::Column::SaleId, Expr::value(sale_id))
            .filter(entity::user_pass::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Detaches every item from the sale so it returns to the owner's cart.
    pub async fn release_sale(&self, sale_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::UserPass::update_many()
            .col_expr(
                entity::user_pass::Column::SaleId,
                Expr::value(sea_orm::Value::Int(None)),
            )
            .filter(entity::user_pass::Column::SaleId.eq(sale_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets a user's passes in a convention, optionally only those in a valid status.
    pub async fn by_convention_user(
        &self,
        convention_id: i32,
        user_id: i32,
        valid_only: bool,
    ) -> Result<Vec<UserPass>, DbErr> {
        let mut query = entity::prelude::UserPass::find()
            .inner_join(entity::prelude::Pass)
            .filter(entity::pass::Column::ConventionId.eq(convention_id))
            .filter(entity::user_pass::Column::UserId.eq(user_id));

        if valid_only {
            query = query.filter(
                entity::user_pass::Column::Status
                    .is_in(SaleItemStatus::VALID.iter().map(|s| s.as_str())),
            );
        }

        query
            .order_by_asc(entity::user_pass::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(UserPass::from_entity)
            .collect()
    }

    /// Passes still reserved that were reserved before `latest`.
    pub async fn reserved_before(&self, latest: DateTime<Utc>) -> Result<Vec<UserPass>, DbErr> {
        self.in_status_before(SaleItemStatus::Reserved, latest).await
    }

    /// Passes stuck in processing that were reserved before `latest`.
    pub async fn processing_before(
        &self,
        latest: DateTime<Utc>,
    ) -> Result<Vec<UserPass>, DbErr> {
        self.in_status_before(SaleItemStatus::Processing, latest)
            .await
    }

    async fn in_status_before(
        &self,
        status: SaleItemStatus,
        latest: DateTime<Utc>,
    ) -> Result<Vec<UserPass>, DbErr> {
        entity::prelude::UserPass::find()
            .filter(entity::user_pass::Column::Status.eq(status.as_str()))
            .filter(entity::user_pass::Column::ReservedTime.lt(latest))
            .order_by_asc(entity::user_pass::Column::ReservedTime)
            .all(self.db)
            .await?
            .into_iter()
            .map(UserPass::from_entity)
            .collect()
    }

    pub async fn by_sale(&self, sale_id: i32) -> Result<Vec<UserPass>, DbErr> {
        entity::prelude::UserPass::find()
            .filter(entity::user_pass::Column::SaleId.eq(sale_id))
            .order_by_asc(entity::user_pass::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(UserPass::from_entity)
            .collect()
    }

    /// Reserved passes of the user in the convention that are not attached to a sale.
    pub async fn in_cart(&self, convention_id: i32, user_id: i32) -> Result<Vec<UserPass>, DbErr> {
        entity::prelude::UserPass::find()
            .inner_join(entity::prelude::Pass)
            .filter(entity::pass::Column::ConventionId.eq(convention_id))
            .filter(entity::user_pass::Column::UserId.eq(user_id))
            .filter(entity::user_pass::Column::Status.eq(SaleItemStatus::Reserved.as_str()))
            .filter(entity::user_pass::Column::SaleId.is_null())
            .order_by_asc(entity::user_pass::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(UserPass::from_entity)
            .collect()
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::UserPass::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
