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
                    .table(UserRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(UserRecord::Id))
                    .col(integer(UserRecord::ConventionId))
                    .col(integer(UserRecord::UserId))
                    .col(string(UserRecord::Descriptor))
                    .col(string(UserRecord::ContentType))
                    .col(text(UserRecord::Data))
                    .col(string(UserRecord::Acl).default("private"))
                    .col(
                        timestamp(UserRecord::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(UserRecord::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_record_convention_id")
                            .from(UserRecord::Table, UserRecord::ConventionId)
                            .to(Convention::Table, Convention::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_record_user_id")
                            .from(UserRecord::Table, UserRecord::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_record_key")
                    .table(UserRecord::Table)
                    .col(UserRecord::ConventionId)
                    .col(UserRecord::UserId)
                    .col(UserRecord::Descriptor)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserRecord {
    Table,
    Id,
    ConventionId,
    UserId,
    Descriptor,
    ContentType,
    Data,
    Acl,
    CreatedAt,
    UpdatedAt,
}
