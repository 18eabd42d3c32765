//! Shared helpers for integration tests.
//!
//! Every test gets its own in-memory SQLite database with all migrations
//! applied.

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectionTrait, Statement};

use quality_registry::config::{Config, ParticipantScope};
use quality_registry::domain::{NewParticipant, NewSoftware};
use quality_registry::infra::Database;
use quality_registry::services::{AuthService, ServiceContainer, Services};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

pub struct TestContext {
    pub db: Arc<Database>,
    pub config: Config,
    pub services: Services,
}

pub fn test_config(scope: ParticipantScope) -> Config {
    Config::new("sqlite::memory:", TEST_SECRET).with_participant_scope(scope)
}

pub async fn setup() -> TestContext {
    setup_with_scope(ParticipantScope::Software).await
}

pub async fn setup_with_scope(scope: ParticipantScope) -> TestContext {
    let config = test_config(scope);
    let db = Database::connect(&config)
        .await
        .expect("in-memory database should migrate");
    let services = Services::from_connection(db.get_connection(), config.clone());

    TestContext {
        db: Arc::new(db),
        config,
        services,
    }
}

/// Register an account and return its id
pub async fn register_user(ctx: &TestContext, username: &str) -> i32 {
    ctx.services
        .auth()
        .register(
            username.to_string(),
            format!("{}@example.com", username),
            "SecurePass123!".to_string(),
        )
        .await
        .expect("registration should succeed")
        .id
}

pub fn software_request(name: &str, participants: &[(&str, &str)]) -> NewSoftware {
    NewSoftware {
        name: name.to_string(),
        city: "Pasto".to_string(),
        general_objective: "Controlar el inventario".to_string(),
        description: "Aplicación de inventario".to_string(),
        version: "1.0.0".to_string(),
        participants: participants
            .iter()
            .map(|(name, role)| NewParticipant {
                name: name.to_string(),
                role: role.to_string(),
            })
            .collect(),
    }
}

/// Row count of a table
pub async fn count_rows(db: &Database, table: &str) -> i64 {
    let conn = db.connection();
    let row = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {}", table),
        ))
        .await
        .expect("count query should run")
        .expect("count query returns a row");
    row.try_get::<i64>("", "n").expect("count is an integer")
}

/// Execute raw SQL, returning the database error if any
pub async fn exec(db: &Database, sql: &str) -> Result<(), sea_orm::DbErr> {
    db.connection().execute_unprepared(sql).await.map(|_| ())
}
