use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait};
use serde_json::{Map, Value};

use crate::server::model::sale::{CreateSaleParams, Sale};

pub struct SaleRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SaleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateSaleParams) -> Result<Sale, DbErr> {
        let sale = entity::sale::ActiveModel {
            convention_id: ActiveValue::Set(params.convention_id),
            user_id: ActiveValue::Set(params.user_id),
            cashier_id: ActiveValue::Set(params.cashier_id),
            original_sale_id: ActiveValue::Set(params.original_sale_id),
            transaction_id: ActiveValue::Set(None),
            sale_time: ActiveValue::Set(Utc::now()),
            cancellation_notes: ActiveValue::Set(params.cancellation_notes),
            processor_data: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Sale::from_entity(sale)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Sale>, DbErr> {
        entity::prelude::Sale::find_by_id(id)
            .one(self.db)
            .await?
            .map(Sale::from_entity)
            .transpose()
    }

    /// Replaces the stored processor data, and the transaction id when one is given.
    pub async fn update_processor_data(
        &self,
        id: i32,
        processor_data: &Map<String, Value>,
        transaction_id: Option<String>,
    ) -> Result<Sale, DbErr> {
        let encoded = Value::Object(processor_data.clone()).to_string();

        let sale = entity::sale::ActiveModel {
            id: ActiveValue::Unchanged(id),
            processor_data: ActiveValue::Set(Some(encoded)),
            transaction_id: match transaction_id {
                Some(transaction_id) => ActiveValue::Set(Some(transaction_id)),
                None => ActiveValue::NotSet,
            },
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Sale::from_entity(sale)
    }

    pub async fn set_cancellation_notes(&self, id: i32, notes: String) -> Result<Sale, DbErr> {
        let sale = entity::sale::ActiveModel {
            id: ActiveValue::Unchanged(id),
            cancellation_notes: ActiveValue::Set(Some(notes)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Sale::from_entity(sale)
    }
}
