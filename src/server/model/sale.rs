//! Sale domain model and the items a sale pays for.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde_json::{Map, Value};

use crate::{
    model::sale::{CartDto, SaleDto},
    server::model::{pass::UserPass, ticket::Ticket},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub id: i32,
    pub convention_id: i32,
    pub user_id: i32,
    pub cashier_id: Option<i32>,
    /// Set on cancellation sales.
    pub original_sale_id: Option<i32>,
    pub transaction_id: Option<String>,
    pub sale_time: DateTime<Utc>,
    pub cancellation_notes: Option<String>,
    /// Processor metadata; an empty map when nothing was stored yet.
    pub processor_data: Map<String, Value>,
}

impl Sale {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Sale)` - Converted model
    /// - `Err(DbErr::Custom)` - Stored processor data is not valid JSON
    pub fn from_entity(entity: entity::sale::Model) -> Result<Self, DbErr> {
        let processor_data = match entity.processor_data.as_deref() {
            None | Some("") => Map::new(),
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => Map::new(),
                Err(e) => {
                    return Err(DbErr::Custom(format!(
                        "Sale {} has malformed processor data: {}",
                        entity.id, e
                    )))
                }
            },
        };

        Ok(Self {
            id: entity.id,
            convention_id: entity.convention_id,
            user_id: entity.user_id,
            cashier_id: entity.cashier_id,
            original_sale_id: entity.original_sale_id,
            transaction_id: entity.transaction_id,
            sale_time: entity.sale_time,
            cancellation_notes: entity.cancellation_notes,
            processor_data,
        })
    }

    pub fn into_dto(self, total: f64) -> SaleDto {
        SaleDto {
            id: self.id,
            user_id: self.user_id,
            convention_id: self.convention_id,
            cashier_id: self.cashier_id,
            original_sale_id: self.original_sale_id,
            transaction_id: self.transaction_id,
            sale_time: self.sale_time,
            cancellation_notes: self.cancellation_notes,
            total,
        }
    }
}

/// Parameters for creating a sale row.
#[derive(Debug, Clone)]
pub struct CreateSaleParams {
    pub convention_id: i32,
    pub user_id: i32,
    pub cashier_id: Option<i32>,
    pub original_sale_id: Option<i32>,
    pub cancellation_notes: Option<String>,
}

/// Everything attached to a sale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleItems {
    pub tickets: Vec<Ticket>,
    pub passes: Vec<UserPass>,
}

impl SaleItems {
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty() && self.passes.is_empty()
    }

    /// Sum of the item prices.
    pub fn total(&self) -> f64 {
        self.tickets.iter().map(|t| t.price).sum::<f64>()
            + self.passes.iter().map(|p| p.price).sum::<f64>()
    }

    pub fn into_cart_dto(self) -> CartDto {
        let total = self.total();
        CartDto {
            tickets: self.tickets.into_iter().map(Ticket::into_dto).collect(),
            passes: self.passes.into_iter().map(UserPass::into_dto).collect(),
            total,
        }
    }
}

/// Outcome reported by a payment gateway callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Fail,
    Cancel,
}
