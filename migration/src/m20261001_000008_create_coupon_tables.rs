use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User,
    m20261001_000002_create_convention_table::Convention,
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
                    .table(CouponType::Table)
                    .if_not_exists()
                    .col(pk_auto(CouponType::Id))
                    .col(integer(CouponType::ConventionId))
                    .col(string(CouponType::Title))
                    .col(double(CouponType::Value))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_type_convention_id")
                            .from(CouponType::Table, CouponType::ConventionId)
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
                    .table(Coupon::Table)
                    .if_not_exists()
                    .col(pk_auto(Coupon::Id))
                    .col(integer(Coupon::CouponTypeId))
                    .col(integer(Coupon::ConventionId))
                    .col(integer(Coupon::UserId))
                    .col(double(Coupon::Value))
                    .col(integer_null(Coupon::SaleId))
                    .col(integer_null(Coupon::UserPassId))
                    .col(
                        timestamp(Coupon::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_coupon_type_id")
                            .from(Coupon::Table, Coupon::CouponTypeId)
                            .to(CouponType::Table, CouponType::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_user_id")
                            .from(Coupon::Table, Coupon::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_sale_id")
                            .from(Coupon::Table, Coupon::SaleId)
                            .to(Sale::Table, Sale::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_user_pass_id")
                            .from(Coupon::Table, Coupon::UserPassId)
                            .to(UserPass::Table, UserPass::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Coupon::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CouponType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CouponType {
    Table,
    Id,
    ConventionId,
    Title,
    Value,
}

#[derive(DeriveIden)]
pub enum Coupon {
    Table,
    Id,
    CouponTypeId,
    ConventionId,
    UserId,
    Value,
    SaleId,
    UserPassId,
    CreatedAt,
}
