//! Payment gateway adapters.
//!
//! A `PaymentProcessor` knows one gateway's form and callback fields. It never touches the
//! database: `PaymentService` stores what the processor returns and applies the callback
//! outcome to the sale.

pub mod pelepay;

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::{
    model::sale::PaymentFormDto,
    server::{
        error::payment::PaymentError,
        model::{sale::PaymentOutcome, sale::Sale, user::User},
        util::input::Input,
    },
};

/// Everything a processor needs to build a payment form for a sale.
#[derive(Debug, Clone)]
pub struct TransactionRequest<'a> {
    pub sale: &'a Sale,
    pub buyer: &'a User,
    pub convention_title: &'a str,
    pub total: f64,
    /// Where the buyer lands after paying.
    pub ok_url: &'a str,
    /// Where the buyer lands after a failed or cancelled payment.
    pub fail_url: &'a str,
}

/// A gateway form the client submits to start paying.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub action: String,
    pub method: String,
    pub fields: BTreeMap<String, String>,
}

impl PaymentForm {
    pub fn into_dto(self) -> PaymentFormDto {
        PaymentFormDto {
            action: self.action,
            method: self.method,
            fields: self.fields,
        }
    }
}

/// Result of starting a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTransaction {
    pub form: PaymentForm,
    /// Merged into the sale's processor data.
    pub processor_data: Map<String, Value>,
}

/// A decoded gateway callback.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCallback {
    /// Sale id as sent by the gateway, not yet validated.
    pub sale: String,
    /// Raw status; see `outcome()`.
    pub status: String,
    /// Failure description reported by the gateway.
    pub reason: Option<String>,
    pub transaction_id: String,
    /// Key under which `response` is stored in the sale's processor data.
    pub response_key: &'static str,
    pub response: Map<String, Value>,
}

impl GatewayCallback {
    /// Maps the raw status to an outcome.
    ///
    /// # Returns
    /// - `Ok(PaymentOutcome)` - `success`, `fail` or `cancel`
    /// - `Err(PaymentError::UnknownStatus)` - Anything else
    pub fn outcome(&self) -> Result<PaymentOutcome, PaymentError> {
        match self.status.as_str() {
            "success" => Ok(PaymentOutcome::Success),
            "fail" => Ok(PaymentOutcome::Fail),
            "cancel" => Ok(PaymentOutcome::Cancel),
            other => Err(PaymentError::UnknownStatus(other.to_string())),
        }
    }
}

pub trait PaymentProcessor: Send + Sync {
    /// Gateway name, as used in the callback path.
    fn name(&self) -> &'static str;

    /// Builds the payment form for a sale.
    fn create_transaction(&self, request: &TransactionRequest<'_>) -> PreparedTransaction;

    /// Decodes the gateway's callback fields.
    fn parse_callback(&self, input: &Input) -> Result<GatewayCallback, PaymentError>;
}
