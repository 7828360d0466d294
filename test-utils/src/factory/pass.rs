//! Pass definition and user pass factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a pass definition priced at 100 in the convention.
pub async fn create_pass(
    db: &DatabaseConnection,
    convention_id: i32,
) -> Result<entity::pass::Model, DbErr> {
    create_pass_with_price(db, convention_id, 100.0).await
}

/// Creates a pass definition with the given nominal price.
pub async fn create_pass_with_price(
    db: &DatabaseConnection,
    convention_id: i32,
    price: f64,
) -> Result<entity::pass::Model, DbErr> {
    entity::pass::ActiveModel {
        convention_id: ActiveValue::Set(convention_id),
        title: ActiveValue::Set(format!("Pass {}", next_id())),
        price: ActiveValue::Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Factory for creating test user passes.
///
/// # Example
///
/// ```rust,ignore
/// let user_pass = UserPassFactory::new(&db, user.id, pass.id)
///     .status("authorized")
///     .sale(Some(sale.id))
///     .build()
///     .await?;
/// ```
pub struct UserPassFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    pass_id: i32,
    sale_id: Option<i32>,
    name: String,
    price: f64,
    status: String,
}

impl<'a> UserPassFactory<'a> {
    /// Creates a new UserPassFactory.
    ///
    /// Defaults:
    /// - name: `"Visitor {id}"`
    /// - price: `100.0`
    /// - status: `"reserved"`
    /// - sale: `None`
    pub fn new(db: &'a DatabaseConnection, user_id: i32, pass_id: i32) -> Self {
        Self {
            db,
            user_id,
            pass_id,
            sale_id: None,
            name: format!("Visitor {}", next_id()),
            price: 100.0,
            status: "reserved".to_string(),
        }
    }

    pub fn sale(mut self, sale_id: Option<i32>) -> Self {
        self.sale_id = sale_id;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the user pass entity into the database.
    pub async fn build(self) -> Result<entity::user_pass::Model, DbErr> {
        entity::user_pass::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            pass_id: ActiveValue::Set(self.pass_id),
            sale_id: ActiveValue::Set(self.sale_id),
            name: ActiveValue::Set(self.name),
            price: ActiveValue::Set(self.price),
            status: ActiveValue::Set(self.status),
            reserved_time: ActiveValue::Set(Utc::now()),
            cancel_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a reserved user pass with default values.
pub async fn create_user_pass(
    db: &DatabaseConnection,
    user_id: i32,
    pass_id: i32,
) -> Result<entity::user_pass::Model, DbErr> {
    UserPassFactory::new(db, user_id, pass_id).build().await
}
