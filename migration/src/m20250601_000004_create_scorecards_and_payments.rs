use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users_and_courses::{Courses, Holes, Users};
use crate::m20250601_000002_create_bookings::TeeTimes;

#[derive(DeriveIden)]
enum Scorecards {
    Table,
    Id,
    UserId,
    CourseId,
    TeeTimeId,
    PlayedDate,
    TotalScore,
    TotalPutts,
    FairwaysHit,
    GreensInRegulation,
    HandicapUsed,
    WeatherConditions,
    Notes,
    IsTournamentRound,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScorecardHoles {
    Table,
    Id,
    ScorecardId,
    HoleId,
    Strokes,
    Putts,
    FairwayHit,
    GreenInRegulation,
    SandSaves,
    Penalties,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    UserId,
    ReferenceType,
    ReferenceId,
    AmountCents,
    Currency,
    PaymentMethod,
    PaymentStatus,
    FailureReason,
    ProcessedAt,
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
                    .table(Scorecards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scorecards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scorecards::UserId).integer().not_null())
                    .col(ColumnDef::new(Scorecards::CourseId).integer().not_null())
                    .col(ColumnDef::new(Scorecards::TeeTimeId).integer().null())
                    .col(ColumnDef::new(Scorecards::PlayedDate).date().not_null())
                    .col(ColumnDef::new(Scorecards::TotalScore).integer().null())
                    .col(ColumnDef::new(Scorecards::TotalPutts).integer().null())
                    .col(ColumnDef::new(Scorecards::FairwaysHit).integer().null())
                    .col(ColumnDef::new(Scorecards::GreensInRegulation).integer().null())
                    .col(ColumnDef::new(Scorecards::HandicapUsed).double().null())
                    .col(
                        ColumnDef::new(Scorecards::WeatherConditions)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Scorecards::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Scorecards::IsTournamentRound)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Scorecards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorecards_user")
                            .from(Scorecards::Table, Scorecards::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorecards_course")
                            .from(Scorecards::Table, Scorecards::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorecards_tee_time")
                            .from(Scorecards::Table, Scorecards::TeeTimeId)
                            .to(TeeTimes::Table, TeeTimes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScorecardHoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScorecardHoles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScorecardHoles::ScorecardId).integer().not_null())
                    .col(ColumnDef::new(ScorecardHoles::HoleId).integer().not_null())
                    .col(ColumnDef::new(ScorecardHoles::Strokes).integer().not_null())
                    .col(ColumnDef::new(ScorecardHoles::Putts).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(ScorecardHoles::FairwayHit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ScorecardHoles::GreenInRegulation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ScorecardHoles::SandSaves).integer().not_null().default(0))
                    .col(ColumnDef::new(ScorecardHoles::Penalties).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorecard_holes_scorecard")
                            .from(ScorecardHoles::Table, ScorecardHoles::ScorecardId)
                            .to(Scorecards::Table, Scorecards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorecard_holes_hole")
                            .from(ScorecardHoles::Table, ScorecardHoles::HoleId)
                            .to(Holes::Table, Holes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::UserId).integer().not_null())
                    .col(ColumnDef::new(Payments::ReferenceType).string_len(30).not_null())
                    .col(ColumnDef::new(Payments::ReferenceId).integer().not_null())
                    .col(ColumnDef::new(Payments::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Currency).string_len(3).not_null().default("USD"))
                    .col(
                        ColumnDef::new(Payments::PaymentMethod)
                            .string_len(30)
                            .not_null()
                            .default("credit_card"),
                    )
                    .col(
                        ColumnDef::new(Payments::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Payments::FailureReason).text().not_null().default(""))
                    .col(ColumnDef::new(Payments::ProcessedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Payments::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Payments::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_user")
                            .from(Payments::Table, Payments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_reference")
                    .table(Payments::Table)
                    .col(Payments::ReferenceType)
                    .col(Payments::ReferenceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScorecardHoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scorecards::Table).to_owned())
            .await?;
        Ok(())
    }
}
