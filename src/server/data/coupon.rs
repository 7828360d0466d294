use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct CouponRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CouponRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_type(&self, id: i32) -> Result<Option<entity::coupon_type::Model>, DbErr> {
        entity::prelude::CouponType::find_by_id(id).one(self.db).await
    }

    /// Coupons of the user in the convention that no sale or pass has consumed yet,
    /// oldest first.
    pub async fn unused_for_user(
        &self,
        convention_id: i32,
        user_id: i32,
    ) -> Result<Vec<entity::coupon::Model>, DbErr> {
        entity::prelude::Coupon::find()
            .filter(entity::coupon::Column::ConventionId.eq(convention_id))
            .filter(entity::coupon::Column::UserId.eq(user_id))
            .filter(entity::coupon::Column::UserPassId.is_null())
            .filter(entity::coupon::Column::SaleId.is_null())
            .order_by_asc(entity::coupon::Column::Id)
            .all(self.db)
            .await
    }

    /// Links a coupon to the user pass that consumed it.
    pub async fn consume(
        &self,
        id: i32,
        user_pass_id: i32,
    ) -> Result<entity::coupon::Model, DbErr> {
        entity::coupon::ActiveModel {
            id: ActiveValue::Unchanged(id),
            user_pass_id: ActiveValue::Set(Some(user_pass_id)),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Issues a new coupon of the given type to the user.
    pub async fn create(
        &self,
        coupon_type: &entity::coupon_type::Model,
        user_id: i32,
        value: f64,
    ) -> Result<entity::coupon::Model, DbErr> {
        entity::coupon::ActiveModel {
            coupon_type_id: ActiveValue::Set(coupon_type.id),
            convention_id: ActiveValue::Set(coupon_type.convention_id),
            user_id: ActiveValue::Set(user_id),
            value: ActiveValue::Set(value),
            sale_id: ActiveValue::Set(None),
            user_pass_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
