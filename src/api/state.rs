//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, EvaluationService, RiskService, RubricService, ServiceContainer, Services,
    SoftwareService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub software_service: Arc<dyn SoftwareService>,
    pub rubric_service: Arc<dyn RubricService>,
    pub evaluation_service: Arc<dyn EvaluationService>,
    pub risk_service: Arc<dyn RiskService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// Services are built by the [`Services`] container over one Unit of Work.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config.clone());
        Self::from_container(&container, database, config)
    }

    /// Create application state from any service container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            software_service: container.software(),
            rubric_service: container.rubric(),
            evaluation_service: container.evaluations(),
            risk_service: container.risks(),
            database,
            config: Arc::new(config),
        }
    }
}
