use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    status::SaleItemStatus,
    ticket::{CreateTicketParams, Interval, Ticket},
};

pub struct TicketRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TicketRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        convention_id: i32,
        params: CreateTicketParams,
        status: SaleItemStatus,
    ) -> Result<Ticket, DbErr> {
        let ticket = entity::ticket::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            convention_id: ActiveValue::Set(convention_id),
            timeslot_id: ActiveValue::Set(params.timeslot_id),
            user_pass_id: ActiveValue::Set(params.user_pass_id),
            sale_id: ActiveValue::Set(None),
            price: ActiveValue::Set(params.price),
            status: ActiveValue::Set(status.as_str().to_string()),
            reserved_time: ActiveValue::Set(Utc::now()),
            cancel_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(ticket)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, DbErr> {
        entity::prelude::Ticket::find_by_id(id)
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Writes a new status, and the cancel reason when one is given.
    pub async fn update_status(
        &self,
        id: i32,
        status: SaleItemStatus,
        cancel_reason: Option<String>,
    ) -> Result<Ticket, DbErr> {
        let ticket = entity::ticket::ActiveModel {
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

        Ticket::from_entity(ticket)
    }

    /// All tickets booked through the user pass, in any status.
    pub async fn by_user_pass(&self, user_pass_id: i32) -> Result<Vec<Ticket>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::UserPassId.eq(user_pass_id))
            .order_by_asc(entity::ticket::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect()
    }

    /// Timeslot intervals of the valid tickets booked through the user pass.
    pub async fn valid_intervals_by_user_pass(
        &self,
        user_pass_id: i32,
    ) -> Result<Vec<Interval>, DbErr> {
        let rows = entity::prelude::Ticket::find()
            .find_also_related(entity::prelude::Timeslot)
            .filter(entity::ticket::Column::UserPassId.eq(user_pass_id))
            .filter(
                entity::ticket::Column::Status
                    .is_in(SaleItemStatus::VALID.iter().map(|s| s.as_str())),
            )
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, timeslot)| timeslot.as_ref().map(Interval::from_timeslot))
            .collect())
    }

    pub async fn by_sale(&self, sale_id: i32) -> Result<Vec<Ticket>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::SaleId.eq(sale_id))
            .order_by_asc(entity::ticket::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect()
    }

    /// Reserved, individually paid tickets of the user that are not attached to a sale.
    ///
    /// Tickets booked through a pass follow their pass and are never in the cart.
    pub async fn in_cart(&self, convention_id: i32, user_id: i32) -> Result<Vec<Ticket>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ConventionId.eq(convention_id))
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .filter(entity::ticket::Column::Status.eq(SaleItemStatus::Reserved.as_str()))
            .filter(entity::ticket::Column::SaleId.is_null())
            .filter(entity::ticket::Column::UserPassId.is_null())
            .order_by_asc(entity::ticket::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect()
    }

    /// Attaches the tickets to a sale.
    pub async fn set_sale(&self, ids: Vec<i32>, sale_id: i32) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::SaleId, Expr::value(sale_id))
            .filter(entity::ticket::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Detaches every item from the sale so it returns to the owner's cart.
    pub async fn release_sale(&self, sale_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::SaleId,
                Expr::value(sea_orm::Value::Int(None)),
            )
            .filter(entity::ticket::Column::SaleId.eq(sale_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_user_pass(&self, user_pass_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Ticket::delete_many()
            .filter(entity::ticket::Column::UserPassId.eq(user_pass_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
