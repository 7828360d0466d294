use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User,
    m20261001_000002_create_convention_table::Convention,
    m20261001_000003_create_event_timeslot_tables::Timeslot,
    m20261001_000005_create_sale_table::Sale, m20261001_000006_create_user_pass_table::UserPass,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(integer(Ticket::UserId))
                    .col(integer(Ticket::ConventionId))
                    .col(integer(Ticket::TimeslotId))
                    .col(integer_null(Ticket::UserPassId))
                    .col(integer_null(Ticket::SaleId))
                    .col(double(Ticket::Price))
                    .col(string(Ticket::Status))
                    .col(timestamp(Ticket::ReservedTime))
                    .col(text_null(Ticket::CancelReason))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_user_id")
                            .from(Ticket::Table, Ticket::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_convention_id")
                            .from(Ticket::Table, Ticket::ConventionId)
                            .to(Convention::Table, Convention::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_timeslot_id")
                            .from(Ticket::Table, Ticket::TimeslotId)
                            .to(Timeslot::Table, Timeslot::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_user_pass_id")
                            .from(Ticket::Table, Ticket::UserPassId)
                            .to(UserPass::Table, UserPass::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_sale_id")
                            .from(Ticket::Table, Ticket::SaleId)
                            .to(Sale::Table, Sale::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    UserId,
    ConventionId,
    TimeslotId,
    UserPassId,
    SaleId,
    Price,
    Status,
    ReservedTime,
    CancelReason,
}
