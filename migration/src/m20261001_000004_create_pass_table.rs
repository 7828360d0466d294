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
                    .table(Pass::Table)
                    .if_not_exists()
                    .col(pk_auto(Pass::Id))
                    .col(integer(Pass::ConventionId))
                    .col(string(Pass::Title))
                    .col(double(Pass::Price))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_convention_id")
                            .from(Pass::Table, Pass::ConventionId)
                            .to(Convention::Table, Convention::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pass::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pass {
    Table,
    Id,
    ConventionId,
    Title,
    Price,
}
