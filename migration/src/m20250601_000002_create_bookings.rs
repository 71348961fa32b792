use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users_and_courses::{Courses, Users};

#[derive(DeriveIden)]
pub(crate) enum TeeTimes {
    Table,
    Id,
    CourseId,
    UserId,
    BookingDate,
    TeeTime,
    PlayersCount,
    CartRequired,
    TotalAmountCents,
    PaymentStatus,
    BookingStatus,
    SpecialRequests,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum RangeSessions {
    Table,
    Id,
    UserId,
    SessionDate,
    StartTime,
    DurationMinutes,
    BallBucketSize,
    BucketPriceCents,
    BayNumber,
    PaymentStatus,
    SessionStatus,
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
                    .table(TeeTimes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeeTimes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeeTimes::CourseId).integer().not_null())
                    .col(ColumnDef::new(TeeTimes::UserId).integer().not_null())
                    .col(ColumnDef::new(TeeTimes::BookingDate).date().not_null())
                    .col(ColumnDef::new(TeeTimes::TeeTime).string_len(5).not_null())
                    .col(ColumnDef::new(TeeTimes::PlayersCount).integer().not_null().default(1))
                    .col(ColumnDef::new(TeeTimes::CartRequired).boolean().not_null().default(false))
                    .col(ColumnDef::new(TeeTimes::TotalAmountCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(TeeTimes::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(TeeTimes::BookingStatus)
                            .string_len(20)
                            .not_null()
                            .default("confirmed"),
                    )
                    .col(ColumnDef::new(TeeTimes::SpecialRequests).text().not_null().default(""))
                    .col(ColumnDef::new(TeeTimes::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(TeeTimes::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tee_times_course")
                            .from(TeeTimes::Table, TeeTimes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tee_times_user")
                            .from(TeeTimes::Table, TeeTimes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A slot can be held by at most one live booking. Cancelled rows stay
        // around for history, so the index only covers the others. Both
        // PostgreSQL and SQLite accept partial indexes with this syntax.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_tee_times_active_slot \
                 ON tee_times (course_id, booking_date, tee_time) \
                 WHERE booking_status <> 'cancelled'",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tee_times_user")
                    .table(TeeTimes::Table)
                    .col(TeeTimes::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RangeSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RangeSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RangeSessions::UserId).integer().not_null())
                    .col(ColumnDef::new(RangeSessions::SessionDate).date().not_null())
                    .col(ColumnDef::new(RangeSessions::StartTime).string_len(5).not_null())
                    .col(
                        ColumnDef::new(RangeSessions::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(ColumnDef::new(RangeSessions::BallBucketSize).string_len(20).not_null())
                    .col(ColumnDef::new(RangeSessions::BucketPriceCents).big_integer().not_null())
                    .col(ColumnDef::new(RangeSessions::BayNumber).integer().null())
                    .col(
                        ColumnDef::new(RangeSessions::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RangeSessions::SessionStatus)
                            .string_len(20)
                            .not_null()
                            .default("booked"),
                    )
                    .col(
                        ColumnDef::new(RangeSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RangeSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_range_sessions_user")
                            .from(RangeSessions::Table, RangeSessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RangeSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeeTimes::Table).to_owned())
            .await?;
        Ok(())
    }
}
