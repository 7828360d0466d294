//! Sales: attaching the cart to a sale and applying payment outcomes to its items.

use sea_orm::{ConnectionTrait, TransactionSession, TransactionTrait};

use crate::server::{
    data::{pass::UserPassRepository, sale::SaleRepository, ticket::TicketRepository},
    error::{sale::SaleError, AppError},
    model::{
        sale::{CreateSaleParams, PaymentOutcome, Sale, SaleItems},
        status::SaleAction,
    },
    service::{pass::PassService, ticket::TicketService},
};

/// Cancel reason written to items of a sale whose payment was cancelled.
pub const PAYMENT_CANCELLED: &str = "Payment cancelled";

pub struct SaleService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SaleService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Sale>, AppError> {
        Ok(SaleRepository::new(self.db).find_by_id(id).await?)
    }

    /// Finds a sale of the convention, `NotFound` for sales of other conventions.
    pub async fn require_in_convention(
        &self,
        convention_id: i32,
        id: i32,
    ) -> Result<Sale, AppError> {
        self.find_by_id(id)
            .await?
            .filter(|sale| sale.convention_id == convention_id)
            .ok_or_else(|| AppError::NotFound(format!("Sale {} not found", id)))
    }

    /// Tickets and passes attached to the sale.
    pub async fn items(&self, sale_id: i32) -> Result<SaleItems, AppError> {
        let tickets = TicketRepository::new(self.db).by_sale(sale_id).await?;
        let passes = UserPassRepository::new(self.db).by_sale(sale_id).await?;

        Ok(SaleItems { tickets, passes })
    }

    /// Sum of the item prices.
    pub fn compute_total(items: &SaleItems) -> f64 {
        items.total()
    }

    pub async fn total(&self, sale_id: i32) -> Result<f64, AppError> {
        Ok(Self::compute_total(&self.items(sale_id).await?))
    }

    /// Applies `action` to every item of the sale. Passes cascade to their tickets.
    pub(crate) async fn transition_items(
        &self,
        sale_id: i32,
        action: SaleAction,
        reason: Option<String>,
    ) -> Result<SaleItems, AppError> {
        let items = self.items(sale_id).await?;
        let tickets = TicketService::new(self.db);
        let passes = PassService::new(self.db);

        let mut result = SaleItems::default();
        for ticket in items.tickets {
            result.tickets.push(
                tickets
                    .transition_ticket(ticket, action, reason.clone())
                    .await?,
            );
        }
        for pass in items.passes {
            result
                .passes
                .push(passes.transition(pass.id, action, reason.clone()).await?);
        }

        Ok(result)
    }

    /// Creates a sale and attaches the user's cart to it.
    pub(crate) async fn create_with_cart(
        &self,
        user_id: i32,
        convention_id: i32,
        cashier_id: Option<i32>,
    ) -> Result<Sale, AppError> {
        let cart = TicketService::new(self.db)
            .shopping_cart(convention_id, user_id)
            .await?;
        if cart.is_empty() {
            return Err(SaleError::EmptyCart.into());
        }

        let sale = SaleRepository::new(self.db)
            .create(CreateSaleParams {
                convention_id,
                user_id,
                cashier_id,
                original_sale_id: None,
                cancellation_notes: None,
            })
            .await?;

        TicketRepository::new(self.db)
            .set_sale(cart.tickets.iter().map(|t| t.id).collect(), sale.id)
            .await?;
        UserPassRepository::new(self.db)
            .set_sale(cart.passes.iter().map(|p| p.id).collect(), sale.id)
            .await?;

        Ok(sale)
    }

    /// Applies a payment outcome to the sale's items.
    ///
    /// - `Success`: items are authorized.
    /// - `Fail`: items are released to reserved and detached from the sale, so the next
    ///   checkout picks them up again; `reason` goes to the sale's cancellation notes.
    /// - `Cancel`: items are cancelled with the reason "Payment cancelled".
    pub(crate) async fn record_outcome(
        &self,
        sale_id: i32,
        outcome: PaymentOutcome,
        reason: Option<String>,
    ) -> Result<SaleItems, AppError> {
        match outcome {
            PaymentOutcome::Success => {
                self.transition_items(sale_id, SaleAction::Authorize, None)
                    .await
            }
            PaymentOutcome::Cancel => {
                self.transition_items(
                    sale_id,
                    SaleAction::Cancel,
                    Some(PAYMENT_CANCELLED.to_string()),
                )
                .await
            }
            PaymentOutcome::Fail => {
                let items = self
                    .transition_items(sale_id, SaleAction::Release, None)
                    .await?;
                TicketRepository::new(self.db).release_sale(sale_id).await?;
                UserPassRepository::new(self.db)
                    .release_sale(sale_id)
                    .await?;
                if let Some(reason) = reason {
                    SaleRepository::new(self.db)
                        .set_cancellation_notes(sale_id, reason)
                        .await?;
                }

                Ok(items)
            }
        }
    }

    async fn require(&self, sale_id: i32) -> Result<Sale, AppError> {
        self.find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Sale {} not found", sale_id)))
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> SaleService<'a, C> {
    /// Creates a sale for everything in the user's shopping cart.
    ///
    /// # Returns
    /// - `Ok(Sale)` - New sale with the cart attached
    /// - `Err(SaleError::EmptyCart)` - Nothing to sell
    pub async fn persist(
        &self,
        user_id: i32,
        convention_id: i32,
        cashier_id: Option<i32>,
    ) -> Result<Sale, AppError> {
        let txn = self.db.begin().await?;
        let sale = SaleService::new(&txn)
            .create_with_cart(user_id, convention_id, cashier_id)
            .await?;
        txn.commit().await?;

        tracing::info!("Created sale {} for user {}", sale.id, user_id);

        Ok(sale)
    }

    /// Moves the sale's items to processing while a payment form is outstanding.
    pub async fn start_processing(&self, sale_id: i32) -> Result<SaleItems, AppError> {
        self.apply(sale_id, SaleAction::Process, None).await
    }

    /// Authorizes every item of a paid sale.
    pub async fn authorized(&self, sale_id: i32) -> Result<SaleItems, AppError> {
        self.apply_outcome(sale_id, PaymentOutcome::Success, None)
            .await
    }

    /// Puts the sale's items back in the cart after a failed payment and records why.
    pub async fn failed(&self, sale_id: i32, reason: String) -> Result<SaleItems, AppError> {
        self.apply_outcome(sale_id, PaymentOutcome::Fail, Some(reason))
            .await
    }

    /// Cancels every item of a sale whose payment was cancelled.
    pub async fn cancelled(&self, sale_id: i32) -> Result<SaleItems, AppError> {
        self.apply_outcome(sale_id, PaymentOutcome::Cancel, None)
            .await
    }

    /// Records a cancellation sale referencing `original_id` and cancels the original's items.
    ///
    /// # Returns
    /// - `Ok(Sale)` - The cancellation sale
    /// - `Err(AppError::NotFound)` - Original sale does not exist
    /// - `Err(SaleError::InvalidTransition)` - An item cannot be cancelled; nothing changed
    pub async fn cancel_sale(
        &self,
        original_id: i32,
        cashier_id: Option<i32>,
        notes: String,
    ) -> Result<Sale, AppError> {
        let txn = self.db.begin().await?;
        let service = SaleService::new(&txn);
        let original = service.require(original_id).await?;

        let cancellation = SaleRepository::new(&txn)
            .create(CreateSaleParams {
                convention_id: original.convention_id,
                user_id: original.user_id,
                cashier_id,
                original_sale_id: Some(original.id),
                cancellation_notes: Some(notes.clone()),
            })
            .await?;

        service
            .transition_items(original.id, SaleAction::Cancel, Some(notes))
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Sale {} cancelled by sale {}",
            original_id,
            cancellation.id
        );

        Ok(cancellation)
    }

    async fn apply(
        &self,
        sale_id: i32,
        action: SaleAction,
        reason: Option<String>,
    ) -> Result<SaleItems, AppError> {
        let txn = self.db.begin().await?;
        let service = SaleService::new(&txn);
        service.require(sale_id).await?;

        let items = service.transition_items(sale_id, action, reason).await?;
        txn.commit().await?;

        Ok(items)
    }

    async fn apply_outcome(
        &self,
        sale_id: i32,
        outcome: PaymentOutcome,
        reason: Option<String>,
    ) -> Result<SaleItems, AppError> {
        let txn = self.db.begin().await?;
        let service = SaleService::new(&txn);
        service.require(sale_id).await?;

        let items = service.record_outcome(sale_id, outcome, reason).await?;
        txn.commit().await?;

        Ok(items)
    }
}
