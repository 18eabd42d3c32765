//! Database connection and schema management.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseBackend, DatabaseConnection,
    DbErr,
};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Shared handle to the registry database
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

/// An in-memory SQLite database lives and dies with its connection, so its
/// pool is pinned to one.
fn connect_options(url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);
    if url.starts_with("sqlite::memory:") || url.contains("mode=memory") {
        options.max_connections(1).min_connections(1);
    }
    options
}

impl Database {
    /// Connect and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::connect_without_migrations(config).await?;
        database.run_migrations().await.map_err(|e| {
            tracing::error!(error = %e, "migrations failed");
            e
        })?;
        tracing::info!("Database connected and migrations applied");
        Ok(database)
    }

    /// Connect only. Used by the `migrate` command.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(connect_options(&config.database_url)).await?;

        // Cascades from software and risks rely on enforced foreign keys
        if connection.get_database_backend() == DatabaseBackend::Sqlite {
            connection
                .execute_unprepared("PRAGMA foreign_keys = ON")
                .await?;
        }

        Ok(Self { connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration with whether it has been applied, oldest first.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.connection).await?;
        Ok(migrations
            .iter()
            .map(|m| {
                let applied = matches!(m.status(), MigrationStatus::Applied);
                (m.name().to_string(), applied)
            })
            .collect())
    }

    /// Drop every table and migrate from scratch.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Round-trip used by the health check.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute_unprepared("SELECT 1")
            .await
            .map(|_| ())
    }
}
