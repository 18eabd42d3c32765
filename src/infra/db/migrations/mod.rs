//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_software_tables;
mod m20240101_000003_create_rubric_tables;
mod m20240101_000004_create_evaluation_tables;
mod m20240101_000005_create_risk_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_software_tables::Migration),
            Box::new(m20240101_000003_create_rubric_tables::Migration),
            Box::new(m20240101_000004_create_evaluation_tables::Migration),
            Box::new(m20240101_000005_create_risk_tables::Migration),
        ]
    }
}
