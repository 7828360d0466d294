use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coupon")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub coupon_type_id: i32,
    pub convention_id: i32,
    pub user_id: i32,
    pub value: f64,
    pub sale_id: Option<i32>,
    /// The user pass that consumed this coupon. Unused coupons have none.
    pub user_pass_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coupon_type::Entity",
        from = "Column::CouponTypeId",
        to = "super::coupon_type::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CouponType,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::coupon_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CouponType.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
