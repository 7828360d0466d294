//! User pass lifecycle.
//!
//! A pass owns the tickets booked through it, so authorizing, cancelling and refunding a
//! pass cascade to those tickets. A cascade that meets a ticket it cannot move aborts the
//! whole operation.

use chrono::{DateTime, Utc};
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
        pass::{CreateUserPassParams, Pass, TimeslotReport, UserPass},
        status::{SaleAction, SaleItemStatus},
    },
    service::ticket::TicketService,
};

pub struct PassService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PassService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserPass>, AppError> {
        Ok(UserPassRepository::new(self.db).find_by_id(id).await?)
    }

    /// Finds a user pass whose pass is sold by the convention.
    ///
    /// # Returns
    /// - `Ok(UserPass)` - The user pass
    /// - `Err(AppError::NotFound)` - No such user pass in this convention
    pub async fn require_in_convention(
        &self,
        convention_id: i32,
        id: i32,
    ) -> Result<UserPass, AppError> {
        let not_found = || AppError::NotFound(format!("User pass {} not found", id));

        let user_pass = self.find_by_id(id).await?.ok_or_else(not_found)?;
        let pass = PassRepository::new(self.db)
            .find_by_id(user_pass.pass_id)
            .await?
            .filter(|pass| pass.convention_id == convention_id);

        match pass {
            Some(_) => Ok(user_pass),
            None => Err(not_found()),
        }
    }

    /// Finds a pass on sale in the convention.
    pub async fn require_pass_in_convention(
        &self,
        convention_id: i32,
        pass_id: i32,
    ) -> Result<Pass, AppError> {
        PassRepository::new(self.db)
            .find_by_id(pass_id)
            .await?
            .filter(|pass| pass.convention_id == convention_id)
            .ok_or_else(|| AppError::NotFound(format!("Pass {} not found", pass_id)))
    }

    /// Gets a user's passes in a convention.
    pub async fn by_convention_user(
        &self,
        convention_id: i32,
        user_id: i32,
        valid_only: bool,
    ) -> Result<Vec<UserPass>, AppError> {
        let repo = UserPassRepository::new(self.db);
        Ok(repo
            .by_convention_user(convention_id, user_id, valid_only)
            .await?)
    }

    /// Passes left in the cart since before `latest`.
    pub async fn reserved_before(&self, latest: DateTime<Utc>) -> Result<Vec<UserPass>, AppError> {
        Ok(UserPassRepository::new(self.db)
            .reserved_before(latest)
            .await?)
    }

    /// Passes waiting on a payment since before `latest`.
    pub async fn processing_before(
        &self,
        latest: DateTime<Utc>,
    ) -> Result<Vec<UserPass>, AppError> {
        Ok(UserPassRepository::new(self.db)
            .processing_before(latest)
            .await?)
    }

    /// Whether none of the pass's valid tickets overlap the interval.
    pub async fn available_during(
        &self,
        user_pass_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let intervals = TicketRepository::new(self.db)
            .valid_intervals_by_user_pass(user_pass_id)
            .await?;

        Ok(!intervals
            .iter()
            .any(|interval| interval.conflicts(start, end)))
    }

    /// Splits the user's valid passes in the timeslot's convention by whether they can book
    /// the timeslot.
    ///
    /// # Returns
    /// - `Ok(TimeslotReport)` - Available and unavailable passes
    /// - `Err(AppError::NotFound)` - Timeslot does not exist
    pub async fn timeslot_report(
        &self,
        user_id: i32,
        timeslot_id: i32,
    ) -> Result<TimeslotReport, AppError> {
        let (interval, convention_id) = TimeslotRepository::new(self.db)
            .find_with_convention(timeslot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Timeslot {} not found", timeslot_id)))?;

        let mut report = TimeslotReport::default();
        for pass in self
            .by_convention_user(convention_id, user_id, true)
            .await?
        {
            if self
                .available_during(pass.id, interval.start, interval.end)
                .await?
            {
                report.available.push(pass);
            } else {
                report.unavailable.push(pass);
            }
        }

        Ok(report)
    }

    /// Creates a reserved user pass and pays for it with the user's unused coupons.
    ///
    /// A missing or zero price means the pass's nominal price.
    ///
    /// Coupons are consumed oldest first until the price reaches zero. The last coupon may be
    /// worth more than what is left; the price never goes below zero.
    pub(crate) async fn create_reserved(
        &self,
        params: CreateUserPassParams,
    ) -> Result<UserPass, AppError> {
        let pass = PassRepository::new(self.db)
            .find_by_id(params.pass_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pass {} not found", params.pass_id)))?;

        let repo = UserPassRepository::new(self.db);
        let price = params
            .price
            .filter(|price| *price > 0.0)
            .unwrap_or(pass.price);
        let user_pass = repo
            .create(params.user_id, pass.id, params.name, price)
            .await?;

        let coupon_repo = CouponRepository::new(self.db);
        let mut remaining = user_pass.price;
        for coupon in coupon_repo
            .unused_for_user(pass.convention_id, params.user_id)
            .await?
        {
            if remaining <= 0.0 {
                break;
            }
            remaining = (remaining - coupon.value).max(0.0);
            coupon_repo.consume(coupon.id, user_pass.id).await?;
        }

        if remaining == user_pass.price {
            return Ok(user_pass);
        }

        tracing::debug!(
            "Coupons lowered user pass {} from {} to {}",
            user_pass.id,
            user_pass.price,
            remaining
        );

        Ok(repo.set_price(user_pass.id, remaining).await?)
    }

    /// Applies `action` to the pass and cascades it to the pass's tickets.
    ///
    /// - Authorize: every ticket in a valid status is authorized.
    /// - Cancel and refund: every ticket is cancelled.
    /// - Process and release: the tickets are left alone.
    pub(crate) async fn transition(
        &self,
        id: i32,
        action: SaleAction,
        reason: Option<String>,
    ) -> Result<UserPass, AppError> {
        let repo = UserPassRepository::new(self.db);
        let pass = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User pass {} not found", id)))?;

        let status = pass.status.apply(action, "pass", id)?;
        let pass = if status == pass.status {
            pass
        } else {
            repo.update_status(id, status, reason.clone()).await?
        };

        let tickets = TicketService::new(self.db);
        let owned = TicketRepository::new(self.db).by_user_pass(id).await?;
        match action {
            SaleAction::Authorize => {
                for ticket in owned.into_iter().filter(|t| t.status.is_valid()) {
                    tickets
                        .transition_ticket(ticket, SaleAction::Authorize, None)
                        .await?;
                }
            }
            SaleAction::Cancel | SaleAction::Refund => {
                for ticket in owned {
                    tickets
                        .transition_ticket(ticket, SaleAction::Cancel, reason.clone())
                        .await?;
                }
            }
            SaleAction::Process | SaleAction::Release => {}
        }

        Ok(pass)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> PassService<'a, C> {
    /// Reserves a pass for a user, consuming unused coupons.
    ///
    /// # Returns
    /// - `Ok(UserPass)` - Reserved pass with its final price
    /// - `Err(AppError::NotFound)` - Pass definition does not exist
    pub async fn persist(&self, params: CreateUserPassParams) -> Result<UserPass, AppError> {
        let txn = self.db.begin().await?;
        let user_pass = PassService::new(&txn).create_reserved(params).await?;
        txn.commit().await?;

        Ok(user_pass)
    }

    /// Authorizes a pass and every valid ticket booked through it.
    pub async fn authorize(&self, id: i32) -> Result<UserPass, AppError> {
        let txn = self.db.begin().await?;
        let pass = PassService::new(&txn)
            .transition(id, SaleAction::Authorize, None)
            .await?;
        txn.commit().await?;

        Ok(pass)
    }

    /// Cancels a pass and all of its tickets.
    ///
    /// # Returns
    /// - `Ok(UserPass)` - Cancelled pass
    /// - `Err(SaleError::InvalidTransition)` - The pass or one of its tickets is refunded;
    ///   nothing was changed
    pub async fn cancel(&self, id: i32, reason: String) -> Result<UserPass, AppError> {
        let txn = self.db.begin().await?;
        let pass = PassService::new(&txn)
            .transition(id, SaleAction::Cancel, Some(reason))
            .await?;
        txn.commit().await?;

        Ok(pass)
    }

    /// Refunds an authorized pass, credits the owner with a coupon worth the pass's nominal
    /// price and cancels the pass's tickets.
    pub async fn refund(
        &self,
        id: i32,
        coupon_type_id: i32,
        reason: String,
    ) -> Result<UserPass, AppError> {
        let txn = self.db.begin().await?;
        let service = PassService::new(&txn);

        let coupon_repo = CouponRepository::new(&txn);
        let coupon_type = coupon_repo
            .find_type(coupon_type_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Coupon type {} not found", coupon_type_id))
            })?;

        let pass = service
            .transition(id, SaleAction::Refund, Some(reason))
            .await?;

        let nominal = PassRepository::new(&txn)
            .find_by_id(pass.pass_id)
            .await?
            .map(|p| p.price)
            .unwrap_or(pass.price);
        coupon_repo
            .create(&coupon_type, pass.user_id, nominal)
            .await?;

        txn.commit().await?;

        tracing::info!("Refunded user pass {} with a coupon of {}", id, nominal);

        Ok(pass)
    }

    /// Deletes a pass and its tickets.
    ///
    /// # Returns
    /// - `Ok(())` - Pass and tickets deleted
    /// - `Err(AppError::NotFound)` - Pass does not exist
    /// - `Err(SaleError::AuthorizedTickets)` - A ticket is authorized; nothing was deleted
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = UserPassRepository::new(&txn);
        let ticket_repo = TicketRepository::new(&txn);

        if repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("User pass {} not found", id)));
        }

        let tickets = ticket_repo.by_user_pass(id).await?;
        if tickets
            .iter()
            .any(|t| t.status == SaleItemStatus::Authorized)
        {
            return Err(SaleError::AuthorizedTickets(id).into());
        }

        ticket_repo.delete_by_user_pass(id).await?;
        repo.delete(id).await?;
        txn.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod test;
