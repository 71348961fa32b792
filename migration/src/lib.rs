pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_and_courses;
mod m20250601_000002_create_bookings;
mod m20250601_000003_create_equipment;
mod m20250601_000004_create_scorecards_and_payments;
mod m20250601_000005_create_weather_and_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_and_courses::Migration),
            Box::new(m20250601_000002_create_bookings::Migration),
            Box::new(m20250601_000003_create_equipment::Migration),
            Box::new(m20250601_000004_create_scorecards_and_payments::Migration),
            Box::new(m20250601_000005_create_weather_and_settings::Migration),
        ]
    }
}
