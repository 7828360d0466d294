use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000002_create_convention_table::Convention;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(integer(Event::ConventionId))
                    .col(string(Event::Title))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_convention_id")
                            .from(Event::Table, Event::ConventionId)
                            .to(Convention::Table, Convention::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Timeslot::Table)
                    .if_not_exists()
                    .col(pk_auto(Timeslot::Id))
                    .col(integer(Timeslot::EventId))
                    .col(timestamp(Timeslot::StartTime))
                    .col(timestamp(Timeslot::EndTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timeslot_event_id")
                            .from(Timeslot::Table, Timeslot::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Timeslot::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    ConventionId,
    Title,
}

#[derive(DeriveIden)]
pub enum Timeslot {
    Table,
    Id,
    EventId,
    StartTime,
    EndTime,
}
