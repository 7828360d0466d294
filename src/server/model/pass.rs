//! Pass definitions and user-owned passes.
//!
//! A `Pass` is what a convention sells; a `UserPass` is one purchase of it, carrying its
//! own lifecycle status and the tickets booked through it.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::sale::UserPassDto,
    server::model::status::{parse_stored_status, SaleItemStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub id: i32,
    pub convention_id: i32,
    pub title: String,
    /// Nominal price.
    pub price: f64,
}

impl Pass {
    pub fn from_entity(entity: entity::pass::Model) -> Self {
        Self {
            id: entity.id,
            convention_id: entity.convention_id,
            title: entity.title,
            price: entity.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPass {
    pub id: i32,
    pub user_id: i32,
    pub pass_id: i32,
    pub sale_id: Option<i32>,
    /// Visitor name printed on the pass.
    pub name: String,
    /// Price fixed at purchase time, after coupons.
    pub price: f64,
    pub status: SaleItemStatus,
    pub reserved_time: DateTime<Utc>,
    pub cancel_reason: Option<String>,
}

impl UserPass {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(UserPass)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored status is not a lifecycle status
    pub fn from_entity(entity: entity::user_pass::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            pass_id: entity.pass_id,
            sale_id: entity.sale_id,
            name: entity.name,
            price: entity.price,
            status: parse_stored_status(&entity.status)?,
            reserved_time: entity.reserved_time,
            cancel_reason: entity.cancel_reason,
        })
    }

    pub fn into_dto(self) -> UserPassDto {
        UserPassDto {
            id: self.id,
            user_id: self.user_id,
            pass_id: self.pass_id,
            sale_id: self.sale_id,
            name: self.name,
            price: self.price,
            status: self.status.to_string(),
            reserved_time: self.reserved_time,
            cancel_reason: self.cancel_reason,
        }
    }
}

/// Parameters for reserving a pass for a user.
#[derive(Debug, Clone)]
pub struct CreateUserPassParams {
    pub user_id: i32,
    pub pass_id: i32,
    pub name: String,
    /// Falls back to the pass's nominal price when absent or zero.
    pub price: Option<f64>,
}

/// A user's valid passes split by whether they can be used for a given timeslot.
#[derive(Debug, Clone, Default)]
pub struct TimeslotReport {
    pub available: Vec<UserPass>,
    pub unavailable: Vec<UserPass>,
}
