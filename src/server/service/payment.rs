//! Checkout and payment gateway callbacks.

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;

use crate::server::{
    data::sale::SaleRepository,
    error::{payment::PaymentError, AppError},
    model::{
        convention::Convention,
        sale::{PaymentOutcome, Sale},
        status::SaleAction,
        user::User,
    },
    payment::{PaymentForm, PaymentProcessor, TransactionRequest},
    service::sale::SaleService,
    util::input::Input,
};

/// A sale created at checkout together with the form that pays for it.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub sale: Sale,
    pub total: f64,
    pub form: PaymentForm,
}

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    processor: &'a dyn PaymentProcessor,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection, processor: &'a dyn PaymentProcessor) -> Self {
        Self { db, processor }
    }

    /// Creates a sale for the user's shopping cart and the gateway form to pay for it.
    ///
    /// The cart items move to processing and the processor's data is stored on the sale.
    ///
    /// # Returns
    /// - `Ok(Checkout)` - Sale, its total and the payment form
    /// - `Err(SaleError::EmptyCart)` - Nothing to pay for
    pub async fn checkout(
        &self,
        user: &User,
        convention: &Convention,
        ok_url: &str,
        fail_url: &str,
    ) -> Result<Checkout, AppError> {
        let txn = self.db.begin().await?;
        let sales = SaleService::new(&txn);

        let sale = sales.create_with_cart(user.id, convention.id, None).await?;
        let total = sales.total(sale.id).await?;

        let prepared = self.processor.create_transaction(&TransactionRequest {
            sale: &sale,
            buyer: user,
            convention_title: &convention.title,
            total,
            ok_url,
            fail_url,
        });

        let mut processor_data = sale.processor_data.clone();
        processor_data.extend(prepared.processor_data);
        let sale = SaleRepository::new(&txn)
            .update_processor_data(sale.id, &processor_data, None)
            .await?;

        sales
            .transition_items(sale.id, SaleAction::Process, None)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Checkout of sale {} for {} via {}",
            sale.id,
            total,
            self.processor.name()
        );

        Ok(Checkout {
            sale,
            total,
            form: prepared.form,
        })
    }

    /// Applies a gateway callback to the sale it references.
    ///
    /// The gateway response is added to the sale's processor data next to whatever was
    /// stored at checkout, and the transaction id is recorded. The sale is read and written
    /// in one transaction.
    ///
    /// # Returns
    /// - `Ok(Sale)` - Updated sale
    /// - `Err(PaymentError::SaleNotFound)` - Sale id unknown or not a number
    /// - `Err(PaymentError::UnknownStatus)` - Status other than success/fail/cancel; the sale
    ///   is left untouched
    /// - `Err(PaymentError::NoItemsToAuthorize)` - Success for a sale whose items went back
    ///   to the cart after a failed payment; the sale is left untouched
    pub async fn handle_callback(&self, input: &Input) -> Result<Sale, AppError> {
        let callback = self.processor.parse_callback(input)?;
        tracing::debug!(
            "Got {} callback for sale {}: {:?}",
            self.processor.name(),
            callback.sale,
            callback.response
        );

        let not_found = || PaymentError::SaleNotFound(callback.sale.clone());
        let sale_id: i32 = callback.sale.trim().parse().map_err(|_| not_found())?;

        let txn = self.db.begin().await?;
        let sale = SaleRepository::new(&txn)
            .find_by_id(sale_id)
            .await?
            .ok_or_else(not_found)?;

        let outcome = callback.outcome()?;

        let sales = SaleService::new(&txn);
        if outcome == PaymentOutcome::Success && sales.items(sale_id).await?.is_empty() {
            tracing::warn!(
                "Payment {} succeeded for sale {} without items",
                callback.transaction_id,
                sale_id
            );
            return Err(PaymentError::NoItemsToAuthorize(sale_id).into());
        }

        let mut processor_data = sale.processor_data;
        processor_data.insert(
            callback.response_key.to_string(),
            Value::Object(callback.response),
        );

        let sale = SaleRepository::new(&txn)
            .update_processor_data(sale_id, &processor_data, Some(callback.transaction_id))
            .await?;
        sales.record_outcome(sale_id, outcome, callback.reason).await?;
        txn.commit().await?;

        tracing::info!("Sale {} payment outcome {:?}", sale_id, outcome);

        Ok(sale)
    }
}

#[cfg(test)]
mod test;
