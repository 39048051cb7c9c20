//! Migrator registering table migrations in dependency order.
//! The junction table is applied last, after both entity tables.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_actor;
mod m20240101_000002_create_film;
mod m20240101_000003_create_film_actor;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_actor::Migration),
            Box::new(m20240101_000002_create_film::Migration),
            Box::new(m20240101_000003_create_film_actor::Migration),
        ]
    }
}
