use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users_and_courses::Users;

#[derive(DeriveIden)]
pub(crate) enum Equipment {
    Table,
    Id,
    Name,
    Category,
    Description,
    RentalPricePerDayCents,
    QuantityAvailable,
    ConditionStatus,
    ImageUrl,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EquipmentRentals {
    Table,
    Id,
    UserId,
    EquipmentId,
    RentalDate,
    DueDate,
    ReturnedAt,
    Quantity,
    RentalPriceCents,
    DepositAmountCents,
    PaymentStatus,
    RentalStatus,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equipment::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Equipment::Category).string_len(50).not_null())
                    .col(ColumnDef::new(Equipment::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Equipment::RentalPricePerDayCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Equipment::QuantityAvailable)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Equipment::QuantityAvailable).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Equipment::ConditionStatus)
                            .string_len(20)
                            .not_null()
                            .default("good"),
                    )
                    .col(ColumnDef::new(Equipment::ImageUrl).string_len(512).not_null().default(""))
                    .col(ColumnDef::new(Equipment::IsAvailable).boolean().not_null().default(true))
                    .col(ColumnDef::new(Equipment::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Equipment::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentRentals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EquipmentRentals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EquipmentRentals::UserId).integer().not_null())
                    .col(ColumnDef::new(EquipmentRentals::EquipmentId).integer().not_null())
                    .col(ColumnDef::new(EquipmentRentals::RentalDate).date().not_null())
                    .col(ColumnDef::new(EquipmentRentals::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(EquipmentRentals::ReturnedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(EquipmentRentals::Quantity).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(EquipmentRentals::RentalPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EquipmentRentals::DepositAmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EquipmentRentals::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(EquipmentRentals::RentalStatus)
                            .string_len(20)
                            .not_null()
                            .default("rented"),
                    )
                    .col(ColumnDef::new(EquipmentRentals::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(EquipmentRentals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EquipmentRentals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_rentals_user")
                            .from(EquipmentRentals::Table, EquipmentRentals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_rentals_equipment")
                            .from(EquipmentRentals::Table, EquipmentRentals::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_equipment_rentals_user")
                    .table(EquipmentRentals::Table)
                    .col(EquipmentRentals::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EquipmentRentals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await?;
        Ok(())
    }
}
