use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct CheckoutDto {
    /// Where the gateway sends the buyer after a successful payment.
    pub ok_url: String,
    /// Where the gateway sends the buyer after a failed or cancelled payment.
    pub fail_url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SaleDto {
    pub id: i32,
    pub user_id: i32,
    pub convention_id: i32,
    pub cashier_id: Option<i32>,
    pub original_sale_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub sale_time: DateTime<Utc>,
    pub cancellation_notes: Option<String>,
    pub total: f64,
}

/// HTML-form description of a payment gateway request.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentFormDto {
    pub action: String,
    pub method: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CheckoutResultDto {
    pub sale: SaleDto,
    pub form: PaymentFormDto,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TicketDto {
    pub id: i32,
    pub user_id: i32,
    pub timeslot_id: i32,
    pub user_pass_id: Option<i32>,
    pub sale_id: Option<i32>,
    pub price: f64,
    pub status: String,
    pub reserved_time: DateTime<Utc>,
    pub cancel_reason: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct UserPassDto {
    pub id: i32,
    pub user_id: i32,
    pub pass_id: i32,
    pub sale_id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub status: String,
    pub reserved_time: DateTime<Utc>,
    pub cancel_reason: Option<String>,
}

/// Reserved items waiting for checkout.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CartDto {
    pub tickets: Vec<TicketDto>,
    pub passes: Vec<UserPassDto>,
    pub total: f64,
}

/// A pass the caller adds to their own cart, at the pass price less their coupons.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ReservePassDto {
    #[serde(alias = "pass_id")]
    pub pass_id: i32,
    /// Visitor name printed on the pass.
    pub name: String,
}

/// A ticket the caller books through one of their passes.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ReserveTicketDto {
    #[serde(alias = "timeslot_id")]
    pub timeslot_id: i32,
    #[serde(alias = "user_pass_id")]
    pub user_pass_id: i32,
}

/// A pass reserved at the sales desk for a visitor.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DeskPassDto {
    /// Email of the visitor.
    pub user: String,
    #[serde(alias = "pass_id")]
    pub pass_id: i32,
    pub name: String,
    /// Defaults to the pass price.
    pub price: Option<f64>,
}

/// A ticket reserved at the sales desk for a visitor.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DeskTicketDto {
    /// Email of the visitor.
    pub user: String,
    #[serde(alias = "timeslot_id")]
    pub timeslot_id: i32,
    #[serde(alias = "user_pass_id")]
    pub user_pass_id: Option<i32>,
    /// Ignored when booked through a pass.
    #[serde(default)]
    pub price: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CancelItemDto {
    pub reason: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct RefundItemDto {
    /// Type of the coupon issued for the refunded amount.
    #[serde(alias = "coupon_type_id")]
    pub coupon_type_id: i32,
    pub reason: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CancelSaleDto {
    pub notes: String,
}
