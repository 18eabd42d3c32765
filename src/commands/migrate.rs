//! Migrate command - schema management for the registry tables.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // `serve` migrates on startup; here every step is explicit
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Registry schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Rolled back the most recent migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            let pending = status.iter().filter(|(_, applied)| !applied).count();
            for (name, applied) in &status {
                println!(
                    "{:<8} {}",
                    if *applied { "applied" } else { "pending" },
                    name
                );
            }
            println!("{} of {} migrations pending", pending, status.len());
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping every table, including users and evaluations");
            db.fresh_migrations().await?;
            tracing::info!("Registry schema recreated");
        }
    }

    Ok(())
}
