pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_directory_tables;
mod m20240101_000002_create_station_tables;
mod m20240101_000003_create_content_tables;
mod m20240101_000004_create_telephony_tables;
mod m20240102_000001_schedule_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_directory_tables::Migration),
            Box::new(m20240101_000002_create_station_tables::Migration),
            Box::new(m20240101_000003_create_content_tables::Migration),
            Box::new(m20240101_000004_create_telephony_tables::Migration),
            Box::new(m20240102_000001_schedule_indexes::Migration),
        ]
    }
}
