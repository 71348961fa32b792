use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users_and_courses::Courses;

#[derive(DeriveIden)]
enum WeatherLogs {
    Table,
    Id,
    CourseId,
    Date,
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    WeatherCondition,
    Precipitation,
    Visibility,
    ApiResponse,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SystemSettings {
    Table,
    Id,
    SettingKey,
    SettingValue,
    Description,
    IsActive,
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
                    .table(WeatherLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeatherLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeatherLogs::CourseId).integer().not_null())
                    .col(ColumnDef::new(WeatherLogs::Date).date().not_null())
                    .col(ColumnDef::new(WeatherLogs::Temperature).double().null())
                    .col(ColumnDef::new(WeatherLogs::Humidity).integer().null())
                    .col(ColumnDef::new(WeatherLogs::WindSpeed).double().null())
                    .col(
                        ColumnDef::new(WeatherLogs::WindDirection)
                            .string_len(3)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(WeatherLogs::WeatherCondition)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(WeatherLogs::Precipitation).double().null())
                    .col(ColumnDef::new(WeatherLogs::Visibility).double().null())
                    .col(ColumnDef::new(WeatherLogs::ApiResponse).text().not_null().default(""))
                    .col(
                        ColumnDef::new(WeatherLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weather_logs_course")
                            .from(WeatherLogs::Table, WeatherLogs::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (course_id, date)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_weather_logs_course_date")
                    .table(WeatherLogs::Table)
                    .col(WeatherLogs::CourseId)
                    .col(WeatherLogs::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::SettingKey)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::SettingValue).text().not_null())
                    .col(ColumnDef::new(SystemSettings::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(SystemSettings::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WeatherLogs::Table).to_owned())
            .await?;
        Ok(())
    }
}
