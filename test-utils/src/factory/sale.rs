//! Sale factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test sales.
pub struct SaleFactory<'a> {
    db: &'a DatabaseConnection,
    convention_id: i32,
    user_id: i32,
    cashier_id: Option<i32>,
    original_sale_id: Option<i32>,
    processor_data: Option<String>,
}

impl<'a> SaleFactory<'a> {
    /// Creates a new SaleFactory for a plain sale with no processor data.
    pub fn new(db: &'a DatabaseConnection, convention_id: i32, user_id: i32) -> Self {
        Self {
            db,
            convention_id,
            user_id,
            cashier_id: None,
            original_sale_id: None,
            processor_data: None,
        }
    }

    pub fn cashier(mut self, cashier_id: Option<i32>) -> Self {
        self.cashier_id = cashier_id;
        self
    }

    pub fn original_sale(mut self, original_sale_id: Option<i32>) -> Self {
        self.original_sale_id = original_sale_id;
        self
    }

    pub fn processor_data(mut self, processor_data: Option<String>) -> Self {
        self.processor_data = processor_data;
        self
    }

    /// Builds and inserts the sale entity into the database.
    pub async fn build(self) -> Result<entity::sale::Model, DbErr> {
        entity::sale::ActiveModel {
            convention_id: ActiveValue::Set(self.convention_id),
            user_id: ActiveValue::Set(self.user_id),
            cashier_id: ActiveValue::Set(self.cashier_id),
            original_sale_id: ActiveValue::Set(self.original_sale_id),
            transaction_id: ActiveValue::Set(None),
            sale_time: ActiveValue::Set(Utc::now()),
            cancellation_notes: ActiveValue::Set(None),
            processor_data: ActiveValue::Set(self.processor_data),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a plain sale for the user in the convention.
pub async fn create_sale(
    db: &DatabaseConnection,
    convention_id: i32,
    user_id: i32,
) -> Result<entity::sale::Model, DbErr> {
    SaleFactory::new(db, convention_id, user_id).build().await
}
