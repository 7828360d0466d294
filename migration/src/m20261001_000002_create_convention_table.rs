use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Convention::Table)
                    .if_not_exists()
                    .col(pk_auto(Convention::Id))
                    .col(string(Convention::Title))
                    .col(string_uniq(Convention::ApiKey))
                    .col(string(Convention::ApiSecret))
                    .col(
                        timestamp(Convention::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ConventionManager::Table)
                    .if_not_exists()
                    .col(integer(ConventionManager::ConventionId))
                    .col(integer(ConventionManager::UserId))
                    .primary_key(
                        Index::create()
                            .col(ConventionManager::ConventionId)
                            .col(ConventionManager::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_convention_manager_convention_id")
                            .from(ConventionManager::Table, ConventionManager::ConventionId)
                            .to(Convention::Table, Convention::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_convention_manager_user_id")
                            .from(ConventionManager::Table, ConventionManager::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConventionManager::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Convention::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Convention {
    Table,
    Id,
    Title,
    ApiKey,
    ApiSecret,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum ConventionManager {
    Table,
    ConventionId,
    UserId,
}
