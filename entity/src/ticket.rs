use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub convention_id: i32,
    pub timeslot_id: i32,
    /// Pass the ticket was booked through, if any.
    pub user_pass_id: Option<i32>,
    pub sale_id: Option<i32>,
    pub price: f64,
    pub status: String,
    pub reserved_time: DateTimeUtc,
    pub cancel_reason: Option<String>,
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
        belongs_to = "super::timeslot::Entity",
        from = "Column::TimeslotId",
        to = "super::timeslot::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Timeslot,
    #[sea_orm(
        belongs_to = "super::user_pass::Entity",
        from = "Column::UserPassId",
        to = "super::user_pass::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    UserPass,
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Sale,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::timeslot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timeslot.def()
    }
}

impl Related<super::user_pass::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPass.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
