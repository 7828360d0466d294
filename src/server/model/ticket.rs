//! Ticket domain model.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::sale::TicketDto,
    server::model::status::{parse_stored_status, SaleItemStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub user_id: i32,
    pub convention_id: i32,
    pub timeslot_id: i32,
    pub user_pass_id: Option<i32>,
    pub sale_id: Option<i32>,
    pub price: f64,
    pub status: SaleItemStatus,
    pub reserved_time: DateTime<Utc>,
    pub cancel_reason: Option<String>,
}

impl Ticket {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored status is not a lifecycle status
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            convention_id: entity.convention_id,
            timeslot_id: entity.timeslot_id,
            user_pass_id: entity.user_pass_id,
            sale_id: entity.sale_id,
            price: entity.price,
            status: parse_stored_status(&entity.status)?,
            reserved_time: entity.reserved_time,
            cancel_reason: entity.cancel_reason,
        })
    }

    pub fn into_dto(self) -> TicketDto {
        TicketDto {
            id: self.id,
            user_id: self.user_id,
            timeslot_id: self.timeslot_id,
            user_pass_id: self.user_pass_id,
            sale_id: self.sale_id,
            price: self.price,
            status: self.status.to_string(),
            reserved_time: self.reserved_time,
            cancel_reason: self.cancel_reason,
        }
    }
}

/// Parameters for reserving a ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParams {
    pub user_id: i32,
    pub timeslot_id: i32,
    /// Book through this pass instead of paying per ticket.
    pub user_pass_id: Option<i32>,
    pub price: f64,
}

/// Time interval of a timeslot, used for pass availability checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn from_timeslot(timeslot: &entity::timeslot::Model) -> Self {
        Self {
            start: timeslot.start_time,
            end: timeslot.end_time,
        }
    }

    /// Two intervals conflict when they share any time; touching ends do not conflict.
    pub fn conflicts(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}
