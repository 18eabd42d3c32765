//! Service Container - Centralized service access with parallel execution support.
//!
//! - Centralized access to all application services
//! - Thread-safe concurrent access via Arc
//! - Parallel execution utilities for independent reads

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, EvaluationManager, EvaluationService, RiskManager, RiskService,
    RubricManager, RubricService, SoftwareManager, SoftwareService, UserManager, UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn software(&self) -> Arc<dyn SoftwareService>;

    fn rubric(&self) -> Arc<dyn RubricService>;

    fn evaluations(&self) -> Arc<dyn EvaluationService>;

    fn risks(&self) -> Arc<dyn RiskService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    software_service: Arc<dyn SoftwareService>,
    rubric_service: Arc<dyn RubricService>,
    evaluation_service: Arc<dyn EvaluationService>,
    risk_service: Arc<dyn RiskService>,
}

impl Services {
    /// Create service container from database connection and config.
    ///
    /// All services share one Unit of Work.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let participant_scope = config.participant_scope;

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            software_service: Arc::new(SoftwareManager::new(uow.clone(), participant_scope)),
            rubric_service: Arc::new(RubricManager::new(uow.clone())),
            evaluation_service: Arc::new(EvaluationManager::new(uow.clone())),
            risk_service: Arc::new(RiskManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn software(&self) -> Arc<dyn SoftwareService> {
        self.software_service.clone()
    }

    fn rubric(&self) -> Arc<dyn RubricService> {
        self.rubric_service.clone()
    }

    fn evaluations(&self) -> Arc<dyn EvaluationService> {
        self.evaluation_service.clone()
    }

    fn risks(&self) -> Arc<dyn RiskService> {
        self.risk_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute four independent async operations in parallel.
    ///
    /// If any operation fails, the error is returned immediately.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }

    /// Execute a collection of homogeneous async operations in parallel.
    ///
    /// Results are returned in the same order as the input futures.
    pub async fn join_all<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_join_all_keeps_input_order() {
        let futures: Vec<_> = (0..5)
            .map(|i| async move {
                tokio::task::yield_now().await;
                Ok(i) as AppResult<i32>
            })
            .collect();
        let results = parallel::join_all(futures).await.unwrap();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_join4_fails_on_first_error() {
        async fn ok(v: i32) -> AppResult<i32> {
            Ok(v)
        }
        async fn missing() -> AppResult<i32> {
            Err(AppError::NotFound)
        }

        let result = parallel::join4(ok(1), ok(2), missing(), ok(4)).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
