//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and owns transaction lifecycle:
//! work done through a [`TransactionContext`] commits once when the closure
//! succeeds and rolls back when it returns an error.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    EvaluationRepository, EvaluationStore, RiskRepository, RiskStore, RubricRepository,
    RubricStore, SoftwareRepository, SoftwareStore, TxEvaluationRepository, TxRiskRepository,
    TxRubricRepository, TxSoftwareRepository, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods; services
/// are tested against [`Persistence`] on SQLite or with mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn software(&self) -> Arc<dyn SoftwareRepository>;

    fn rubric(&self) -> Arc<dyn RubricRepository>;

    fn evaluations(&self) -> Arc<dyn EvaluationRepository>;

    fn risks(&self) -> Arc<dyn RiskRepository>;

    /// Execute a closure within a ReadCommitted transaction.
    ///
    /// Committed on success, rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a Serializable transaction.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// The context borrows the transaction, so repositories obtained from it
/// cannot outlive it.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn software(&self) -> TxSoftwareRepository<'_> {
        TxSoftwareRepository::new(self.txn)
    }

    pub fn rubric(&self) -> TxRubricRepository<'_> {
        TxRubricRepository::new(self.txn)
    }

    pub fn evaluations(&self) -> TxEvaluationRepository<'_> {
        TxEvaluationRepository::new(self.txn)
    }

    pub fn risks(&self) -> TxRiskRepository<'_> {
        TxRiskRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    software_repo: Arc<SoftwareStore>,
    rubric_repo: Arc<RubricStore>,
    evaluation_repo: Arc<EvaluationStore>,
    risk_repo: Arc<RiskStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            software_repo: Arc::new(SoftwareStore::new(db.clone())),
            rubric_repo: Arc::new(RubricStore::new(db.clone())),
            evaluation_repo: Arc::new(EvaluationStore::new(db.clone())),
            risk_repo: Arc::new(RiskStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn software(&self) -> Arc<dyn SoftwareRepository> {
        self.software_repo.clone()
    }

    fn rubric(&self) -> Arc<dyn RubricRepository> {
        self.rubric_repo.clone()
    }

    fn evaluations(&self) -> Arc<dyn EvaluationRepository> {
        self.evaluation_repo.clone()
    }

    fn risks(&self) -> Arc<dyn RiskRepository> {
        self.risk_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f)
            .await
    }
}

/// Shorthand for running a block inside [`UnitOfWork::transaction`].
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
