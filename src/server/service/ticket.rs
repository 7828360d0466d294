//! Ticket lifecycle and the shopping cart.

use sea_orm::{ConnectionTrait, TransactionSession, TransactionTrait};

use crate::server::{
    data::{
        coupon::CouponRepository,
        pass::{PassRepository, UserPassRepository},
        ticket::TicketRepository,
        timeslot::TimeslotRepository,
    },
    error::{sale::SaleError, AppError},
    model::{
        sale::SaleItems,
        status::{SaleAction, SaleItemStatus},
        ticket::{CreateTicketParams, Ticket},
    },
    service::pass::PassService,
};

pub struct TicketService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TicketService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db).find_by_id(id).await?)
    }

    /// Finds a ticket of the convention, `NotFound` for tickets of other conventions.
    pub async fn require_in_convention(
        &self,
        convention_id: i32,
        id: i32,
    ) -> Result<Ticket, AppError> {
        self.find_by_id(id)
            .await?
            .filter(|ticket| ticket.convention_id == convention_id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    /// Convention of the timeslot's event.
    pub async fn timeslot_convention(&self, timeslot_id: i32) -> Result<Option<i32>, AppError> {
        Ok(TimeslotRepository::new(self.db)
            .find_with_convention(timeslot_id)
            .await?
            .map(|(_, convention_id)| convention_id))
    }

    /// Reserved tickets and passes of the user that are not attached to a sale yet.
    pub async fn shopping_cart(
        &self,
        convention_id: i32,
        user_id: i32,
    ) -> Result<SaleItems, AppError> {
        let tickets = TicketRepository::new(self.db)
            .in_cart(convention_id, user_id)
            .await?;
        let passes = UserPassRepository::new(self.db)
            .in_cart(convention_id, user_id)
            .await?;

        Ok(SaleItems { tickets, passes })
    }

    pub(crate) async fn transition(
        &self,
        id: i32,
        action: SaleAction,
        reason: Option<String>,
    ) -> Result<Ticket, AppError> {
        let ticket = TicketRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

        self.transition_ticket(ticket, action, reason).await
    }

    /// Applies `action` to a loaded ticket, writing only when the status changes.
    pub(crate) async fn transition_ticket(
        &self,
        ticket: Ticket,
        action: SaleAction,
        reason: Option<String>,
    ) -> Result<Ticket, AppError> {
        let status = ticket.status.apply(action, "ticket", ticket.id)?;
        if status == ticket.status {
            return Ok(ticket);
        }

        Ok(TicketRepository::new(self.db)
            .update_status(ticket.id, status, reason)
            .await?)
    }

    async fn create_reserved(&self, params: CreateTicketParams) -> Result<Ticket, AppError> {
        let (interval, convention_id) = TimeslotRepository::new(self.db)
            .find_with_convention(params.timeslot_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Timeslot {} not found", params.timeslot_id))
            })?;

        let Some(user_pass_id) = params.user_pass_id else {
            return Ok(TicketRepository::new(self.db)
                .create(convention_id, params, SaleItemStatus::Reserved)
                .await?);
        };

        let unavailable = SaleError::PassUnavailable {
            pass_id: user_pass_id,
            timeslot_id: params.timeslot_id,
        };

        let user_pass = UserPassRepository::new(self.db)
            .find_by_id(user_pass_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User pass {} not found", user_pass_id)))?;

        let pass_convention = PassRepository::new(self.db)
            .find_by_id(user_pass.pass_id)
            .await?
            .map(|pass| pass.convention_id);

        if user_pass.user_id != params.user_id
            || !user_pass.status.is_valid()
            || pass_convention != Some(convention_id)
        {
            return Err(unavailable.into());
        }

        let available = PassService::new(self.db)
            .available_during(user_pass_id, interval.start, interval.end)
            .await?;
        if !available {
            return Err(unavailable.into());
        }

        // Tickets booked through a pass are paid for by the pass.
        let status = match user_pass.status {
            SaleItemStatus::Authorized => SaleItemStatus::Authorized,
            _ => SaleItemStatus::Reserved,
        };

        Ok(TicketRepository::new(self.db)
            .create(
                convention_id,
                CreateTicketParams {
                    price: 0.0,
                    ..params
                },
                status,
            )
            .await?)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> TicketService<'a, C> {
    /// Reserves a ticket for a timeslot.
    ///
    /// A ticket booked through a pass costs nothing and is authorized right away when the
    /// pass already is.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - New ticket
    /// - `Err(AppError::NotFound)` - Timeslot or pass does not exist
    /// - `Err(SaleError::PassUnavailable)` - Pass belongs to someone else, is no longer
    ///   valid, or is already booked during the timeslot
    pub async fn reserve(&self, params: CreateTicketParams) -> Result<Ticket, AppError> {
        let txn = self.db.begin().await?;
        let ticket = TicketService::new(&txn).create_reserved(params).await?;
        txn.commit().await?;

        Ok(ticket)
    }

    pub async fn authorize(&self, id: i32) -> Result<Ticket, AppError> {
        let txn = self.db.begin().await?;
        let ticket = TicketService::new(&txn)
            .transition(id, SaleAction::Authorize, None)
            .await?;
        txn.commit().await?;

        Ok(ticket)
    }

    pub async fn cancel(&self, id: i32, reason: String) -> Result<Ticket, AppError> {
        let txn = self.db.begin().await?;
        let ticket = TicketService::new(&txn)
            .transition(id, SaleAction::Cancel, Some(reason))
            .await?;
        txn.commit().await?;

        Ok(ticket)
    }

    /// Refunds an authorized ticket and credits the owner with a coupon worth its price.
    pub async fn refund(
        &self,
        id: i32,
        coupon_type_id: i32,
        reason: String,
    ) -> Result<Ticket, AppError> {
        let txn = self.db.begin().await?;

        let coupon_repo = CouponRepository::new(&txn);
        let coupon_type = coupon_repo
            .find_type(coupon_type_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Coupon type {} not found", coupon_type_id))
            })?;

        let ticket = TicketService::new(&txn)
            .transition(id, SaleAction::Refund, Some(reason))
            .await?;
        if ticket.price > 0.0 {
            coupon_repo
                .create(&coupon_type, ticket.user_id, ticket.price)
                .await?;
        }

        txn.commit().await?;

        Ok(ticket)
    }
}

#[cfg(test)]
mod test;
