use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sale")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub convention_id: i32,
    pub user_id: i32,
    pub cashier_id: Option<i32>,
    /// Set on cancellation sales. The transaction id of such a sale is the cancellation
    /// confirmation; the original sale holds the payment transaction id.
    pub original_sale_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub sale_time: DateTimeUtc,
    pub cancellation_notes: Option<String>,
    /// Payment processor metadata as a JSON document.
    #[sea_orm(column_type = "Text", nullable)]
    pub processor_data: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CashierId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Cashier,
    #[sea_orm(
        belongs_to = "super::convention::Entity",
        from = "Column::ConventionId",
        to = "super::convention::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Convention,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::convention::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Convention.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
