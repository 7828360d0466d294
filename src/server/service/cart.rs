//! Putting passes and tickets in a visitor's cart, scoped to one convention.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        pass::{CreateUserPassParams, UserPass},
        sale::SaleItems,
        ticket::{CreateTicketParams, Ticket},
        user::User,
    },
    service::{pass::PassService, ticket::TicketService},
};

pub struct CartService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CartService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reserved items of the user that no sale has picked up yet.
    pub async fn contents(&self, convention_id: i32, user_id: i32) -> Result<SaleItems, AppError> {
        TicketService::new(self.db)
            .shopping_cart(convention_id, user_id)
            .await
    }

    /// Reserves a pass of the convention for the user.
    ///
    /// # Returns
    /// - `Ok(UserPass)` - Reserved pass, priced after the user's coupons
    /// - `Err(AppError::NotFound)` - Pass is not sold by this convention
    pub async fn add_pass(
        &self,
        convention_id: i32,
        params: CreateUserPassParams,
    ) -> Result<UserPass, AppError> {
        let passes = PassService::new(self.db);
        passes
            .require_pass_in_convention(convention_id, params.pass_id)
            .await?;

        let user_pass = passes.persist(params).await?;

        tracing::debug!(
            "User {} reserved pass {} as {}",
            user_pass.user_id,
            user_pass.pass_id,
            user_pass.id
        );

        Ok(user_pass)
    }

    /// Reserves a ticket for a timeslot of the convention.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Reserved ticket
    /// - `Err(AppError::NotFound)` - Timeslot does not belong to this convention
    /// - `Err(SaleError::PassUnavailable)` - See `TicketService::reserve`
    pub async fn add_ticket(
        &self,
        convention_id: i32,
        params: CreateTicketParams,
    ) -> Result<Ticket, AppError> {
        let tickets = TicketService::new(self.db);
        if tickets.timeslot_convention(params.timeslot_id).await? != Some(convention_id) {
            return Err(AppError::NotFound(format!(
                "Timeslot {} not found",
                params.timeslot_id
            )));
        }

        tickets.reserve(params).await
    }

    /// Looks up the visitor a sales desk is serving.
    pub async fn customer(&self, email: &str) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
