use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    DateOfBirth,
    Role,
    MembershipType,
    MembershipExpiry,
    Handicap,
    IsActive,
    EmailVerified,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Courses {
    Table,
    Id,
    Name,
    Description,
    Address,
    Phone,
    Email,
    Par,
    TotalHoles,
    CourseRating,
    SlopeRating,
    GreenFeeCents,
    CartFeeCents,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Holes {
    Table,
    Id,
    CourseId,
    HoleNumber,
    Par,
    Yardage,
    HandicapIndex,
    Description,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::Phone).string_len(32).not_null().default(""))
                    .col(ColumnDef::new(Users::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(20)
                            .not_null()
                            .default("customer"),
                    )
                    .col(
                        ColumnDef::new(Users::MembershipType)
                            .string_len(20)
                            .not_null()
                            .default("basic"),
                    )
                    .col(ColumnDef::new(Users::MembershipExpiry).date().null())
                    .col(ColumnDef::new(Users::Handicap).double().null())
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::EmailVerified).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Courses::Address).string_len(255).not_null().default(""))
                    .col(ColumnDef::new(Courses::Phone).string_len(32).not_null().default(""))
                    .col(ColumnDef::new(Courses::Email).string_len(255).not_null().default(""))
                    .col(ColumnDef::new(Courses::Par).integer().not_null().default(72))
                    .col(ColumnDef::new(Courses::TotalHoles).integer().not_null().default(18))
                    .col(ColumnDef::new(Courses::CourseRating).double().null())
                    .col(ColumnDef::new(Courses::SlopeRating).integer().null())
                    .col(ColumnDef::new(Courses::GreenFeeCents).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Courses::CartFeeCents).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Courses::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Courses::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Holes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Holes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Holes::CourseId).integer().not_null())
                    .col(ColumnDef::new(Holes::HoleNumber).integer().not_null())
                    .col(ColumnDef::new(Holes::Par).integer().not_null())
                    .col(ColumnDef::new(Holes::Yardage).integer().not_null().default(0))
                    .col(ColumnDef::new(Holes::HandicapIndex).integer().not_null().default(0))
                    .col(ColumnDef::new(Holes::Description).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holes_course")
                            .from(Holes::Table, Holes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one row per hole number within a course
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_holes_course_number")
                    .table(Holes::Table)
                    .col(Holes::CourseId)
                    .col(Holes::HoleNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Holes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
