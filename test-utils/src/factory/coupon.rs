//! Coupon type and coupon factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a coupon type worth `value` in the convention.
pub async fn create_coupon_type(
    db: &DatabaseConnection,
    convention_id: i32,
    value: f64,
) -> Result<entity::coupon_type::Model, DbErr> {
    entity::coupon_type::ActiveModel {
        convention_id: ActiveValue::Set(convention_id),
        title: ActiveValue::Set(format!("Coupon type {}", next_id())),
        value: ActiveValue::Set(value),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an unused coupon of the given type for the user.
pub async fn create_coupon(
    db: &DatabaseConnection,
    coupon_type: &entity::coupon_type::Model,
    user_id: i32,
) -> Result<entity::coupon::Model, DbErr> {
    entity::coupon::ActiveModel {
        coupon_type_id: ActiveValue::Set(coupon_type.id),
        convention_id: ActiveValue::Set(coupon_type.convention_id),
        user_id: ActiveValue::Set(user_id),
        value: ActiveValue::Set(coupon_type.value),
        sale_id: ActiveValue::Set(None),
        user_pass_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
