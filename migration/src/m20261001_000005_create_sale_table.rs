use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User,
    m20261001_000002_create_convention_table::Convention,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sale::Table)
                    .if_not_exists()
                    .col(pk_auto(Sale::Id))
                    .col(integer(Sale::ConventionId))
                    .col(integer(Sale::UserId))
                    .col(integer_null(Sale::CashierId))
                    .col(integer_null(Sale::OriginalSaleId))
                    .col(string_null(Sale::TransactionId))
                    .col(timestamp(Sale::SaleTime))
                    .col(text_null(Sale::CancellationNotes))
                    .col(text_null(Sale::ProcessorData))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_convention_id")
                            .from(Sale::Table, Sale::ConventionId)
                            .to(Convention::Table, Convention::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_user_id")
                            .from(Sale::Table, Sale::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_cashier_id")
                            .from(Sale::Table, Sale::CashierId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_original_sale_id")
                            .from(Sale::Table, Sale::OriginalSaleId)
                            .to(Sale::Table, Sale::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sale::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Sale {
    Table,
    Id,
    ConventionId,
    UserId,
    CashierId,
    OriginalSaleId,
    TransactionId,
    SaleTime,
    CancellationNotes,
    ProcessorData,
}
