use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Convention, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Convention)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and convention tables, including convention managers.
    pub fn with_convention_tables(self) -> Self {
        self.with_table(User)
            .with_table(Convention)
            .with_table(ConventionManager)
    }

    /// Adds all tables required for sale, pass and ticket operations.
    ///
    /// Includes the convention tables followed by:
    /// - Event, Timeslot
    /// - Pass
    /// - Sale
    /// - UserPass
    /// - Ticket
    /// - CouponType, Coupon
    pub fn with_sales_tables(self) -> Self {
        self.with_convention_tables()
            .with_table(Event)
            .with_table(Timeslot)
            .with_table(Pass)
            .with_table(Sale)
            .with_table(UserPass)
            .with_table(Ticket)
            .with_table(CouponType)
            .with_table(Coupon)
    }

    /// Adds all tables required for user record operations.
    pub fn with_record_tables(self) -> Self {
        self.with_convention_tables().with_table(UserRecord)
    }

    /// Adds all tables required for authentication: users and auth tokens.
    pub fn with_auth_tables(self) -> Self {
        self.with_table(User).with_table(AuthToken)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
