use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User, m20261001_000004_create_pass_table::Pass,
    m20261001_000005_create_sale_table::Sale,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPass::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPass::Id))
                    .col(integer(UserPass::UserId))
                    .col(integer(UserPass::PassId))
                    .col(integer_null(UserPass::SaleId))
                    .col(string(UserPass::Name))
                    .col(double(UserPass::Price))
                    .col(string(UserPass::Status))
                    .col(timestamp(UserPass::ReservedTime))
                    .col(text_null(UserPass::CancelReason))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_pass_user_id")
                            .from(UserPass::Table, UserPass::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_pass_pass_id")
                            .from(UserPass::Table, UserPass::PassId)
                            .to(Pass::Table, Pass::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_pass_sale_id")
                            .from(UserPass::Table, UserPass::SaleId)
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
            .drop_table(Table::drop().table(UserPass::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserPass {
    Table,
    Id,
    UserId,
    PassId,
    SaleId,
    Name,
    Price,
    Status,
    ReservedTime,
    CancelReason,
}
