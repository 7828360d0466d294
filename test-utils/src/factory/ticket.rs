//! Ticket factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    convention_id: i32,
    timeslot_id: i32,
    user_pass_id: Option<i32>,
    sale_id: Option<i32>,
    price: f64,
    status: String,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory.
    ///
    /// Defaults to a reserved ticket priced at 0 with no pass and no sale.
    pub fn new(
        db: &'a DatabaseConnection,
        user_id: i32,
        convention_id: i32,
        timeslot_id: i32,
    ) -> Self {
        Self {
            db,
            user_id,
            convention_id,
            timeslot_id,
            user_pass_id: None,
            sale_id: None,
            price: 0.0,
            status: "reserved".to_string(),
        }
    }

    pub fn user_pass(mut self, user_pass_id: Option<i32>) -> Self {
        self.user_pass_id = user_pass_id;
        self
    }

    pub fn sale(mut self, sale_id: Option<i32>) -> Self {
        self.sale_id = sale_id;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the ticket entity into the database.
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            convention_id: ActiveValue::Set(self.convention_id),
            timeslot_id: ActiveValue::Set(self.timeslot_id),
            user_pass_id: ActiveValue::Set(self.user_pass_id),
            sale_id: ActiveValue::Set(self.sale_id),
            price: ActiveValue::Set(self.price),
            status: ActiveValue::Set(self.status),
            reserved_time: ActiveValue::Set(Utc::now()),
            cancel_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a reserved ticket with default values.
pub async fn create_ticket(
    db: &DatabaseConnection,
    user_id: i32,
    convention_id: i32,
    timeslot_id: i32,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, user_id, convention_id, timeslot_id)
        .build()
        .await
}
