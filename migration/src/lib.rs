pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_user_table;
mod m20261001_000002_create_convention_table;
mod m20261001_000003_create_event_timeslot_tables;
mod m20261001_000004_create_pass_table;
mod m20261001_000005_create_sale_table;
mod m20261001_000006_create_user_pass_table;
mod m20261001_000007_create_ticket_table;
mod m20261001_000008_create_coupon_tables;
mod m20261001_000009_create_media_table;
mod m20261001_000010_create_user_record_table;
mod m20261001_000011_create_auth_token_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_user_table::Migration),
            Box::new(m20261001_000002_create_convention_table::Migration),
            Box::new(m20261001_000003_create_event_timeslot_tables::Migration),
            Box::new(m20261001_000004_create_pass_table::Migration),
            Box::new(m20261001_000005_create_sale_table::Migration),
            Box::new(m20261001_000006_create_user_pass_table::Migration),
            Box::new(m20261001_000007_create_ticket_table::Migration),
            Box::new(m20261001_000008_create_coupon_tables::Migration),
            Box::new(m20261001_000009_create_media_table::Migration),
            Box::new(m20261001_000010_create_user_record_table::Migration),
            Box::new(m20261001_000011_create_auth_token_table::Migration),
        ]
    }
}
