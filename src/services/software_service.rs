//! Software service - project registration, lookup and removal.

use async_trait::async_trait;
use std::sync::Arc;

use super::container::parallel;
use crate::config::{ParticipantScope, MSG_DUPLICATE_SOFTWARE};
use crate::domain::{NewSoftware, Participant, Software, SoftwareSummary};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Software service trait for dependency injection.
#[async_trait]
pub trait SoftwareService: Send + Sync {
    /// Register a project with its participants in one transaction.
    ///
    /// Fails with a conflict when the user already has a project with the
    /// same name; nothing is written in that case.
    async fn register_software(&self, user_id: i32, request: NewSoftware) -> AppResult<Software>;

    /// Project owned by the user, or None when missing or owned by someone else
    async fn get_software_detail(&self, id: i32, user_id: i32) -> AppResult<Option<Software>>;

    /// Projects of the user with their latest evaluation
    async fn list_software(&self, user_id: i32) -> AppResult<Vec<SoftwareSummary>>;

    /// Participants of an owned project
    async fn list_participants(&self, id: i32, user_id: i32) -> AppResult<Vec<Participant>>;

    /// Delete an owned project and everything recorded under it
    async fn delete_software(&self, id: i32, user_id: i32) -> AppResult<()>;
}

/// Load a project the user owns, NotFound otherwise.
pub(crate) async fn owned_software<U: UnitOfWork>(
    uow: &U,
    id: i32,
    user_id: i32,
) -> AppResult<Software> {
    uow.software()
        .find_owned(id, user_id)
        .await?
        .ok_or_not_found()
}

/// Concrete implementation of SoftwareService using Unit of Work.
pub struct SoftwareManager<U: UnitOfWork> {
    uow: Arc<U>,
    participant_scope: ParticipantScope,
}

impl<U: UnitOfWork> SoftwareManager<U> {
    pub fn new(uow: Arc<U>, participant_scope: ParticipantScope) -> Self {
        Self {
            uow,
            participant_scope,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> SoftwareService for SoftwareManager<U> {
    async fn register_software(&self, user_id: i32, request: NewSoftware) -> AppResult<Software> {
        if self
            .uow
            .software()
            .exists_for_user(user_id, &request.name)
            .await?
        {
            tracing::warn!(user_id, name = %request.name, "Duplicate software name");
            return Err(AppError::conflict(MSG_DUPLICATE_SOFTWARE));
        }

        let scope = self.participant_scope;
        let result = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.software();
                    let software = repo.create(user_id, &request).await?;

                    for participant in request.participants {
                        let within = match scope {
                            ParticipantScope::Software => Some(software.id),
                            ParticipantScope::Global => None,
                        };
                        if repo.participant_exists(&participant.name, within).await? {
                            tracing::debug!(
                                software_id = software.id,
                                name = %participant.name,
                                "Skipping duplicate participant"
                            );
                            continue;
                        }
                        repo.add_participant(software.id, participant.name, participant.role)
                            .await?;
                    }

                    Ok(software)
                })
            })
            .await;

        match result {
            Ok(software) => {
                tracing::info!(software_id = software.id, user_id, "Software registered");
                Ok(software)
            }
            // Lost a race with a concurrent registration of the same name
            Err(e) if e.is_unique_violation() => {
                tracing::warn!(user_id, "Duplicate software name rejected by the database");
                Err(AppError::conflict(MSG_DUPLICATE_SOFTWARE))
            }
            Err(e) => Err(e),
        }
    }

    async fn get_software_detail(&self, id: i32, user_id: i32) -> AppResult<Option<Software>> {
        self.uow.software().find_owned(id, user_id).await
    }

    async fn list_software(&self, user_id: i32) -> AppResult<Vec<SoftwareSummary>> {
        let projects = self.uow.software().list_for_user(user_id).await?;

        let evaluations = self.uow.evaluations();
        let latest = parallel::join_all(
            projects
                .iter()
                .map(|software| evaluations.latest_for_software(software.id))
                .collect(),
        )
        .await?;

        Ok(projects
            .into_iter()
            .zip(latest)
            .map(|(software, evaluation)| SoftwareSummary::new(software, evaluation))
            .collect())
    }

    async fn list_participants(&self, id: i32, user_id: i32) -> AppResult<Vec<Participant>> {
        let software = owned_software(self.uow.as_ref(), id, user_id).await?;
        self.uow.software().list_participants(software.id).await
    }

    async fn delete_software(&self, id: i32, user_id: i32) -> AppResult<()> {
        let software = owned_software(self.uow.as_ref(), id, user_id).await?;
        if !self.uow.software().delete(software.id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(software_id = software.id, user_id, "Software deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::NewParticipant;
    use crate::infra::repositories::entities::software_participant::Entity as ParticipantEntity;
    use crate::infra::{
        Database, EvaluationRepository, MockEvaluationRepository, MockRiskRepository,
        MockRubricRepository, MockSoftwareRepository, MockUserRepository, Persistence,
        RiskRepository, RubricRepository, SoftwareRepository, TransactionContext, UserRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use sea_orm::EntityTrait;

    /// Unit of work over mocked repositories. Opening a transaction is a
    /// test failure: the paths under test must not write.
    struct MockedUow {
        software: Arc<MockSoftwareRepository>,
    }

    #[async_trait]
    impl UnitOfWork for MockedUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn software(&self) -> Arc<dyn SoftwareRepository> {
            self.software.clone()
        }

        fn rubric(&self) -> Arc<dyn RubricRepository> {
            Arc::new(MockRubricRepository::new())
        }

        fn evaluations(&self) -> Arc<dyn EvaluationRepository> {
            Arc::new(MockEvaluationRepository::new())
        }

        fn risks(&self) -> Arc<dyn RiskRepository> {
            Arc::new(MockRiskRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            panic!("unexpected transaction");
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            panic!("unexpected transaction");
        }
    }

    /// Real storage behind a name check that always misses, as when two
    /// registrations of the same name race past the check.
    struct StaleCheckUow {
        inner: Persistence,
        software: Arc<MockSoftwareRepository>,
    }

    #[async_trait]
    impl UnitOfWork for StaleCheckUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.inner.users()
        }

        fn software(&self) -> Arc<dyn SoftwareRepository> {
            self.software.clone()
        }

        fn rubric(&self) -> Arc<dyn RubricRepository> {
            self.inner.rubric()
        }

        fn evaluations(&self) -> Arc<dyn EvaluationRepository> {
            self.inner.evaluations()
        }

        fn risks(&self) -> Arc<dyn RiskRepository> {
            self.inner.risks()
        }

        async fn transaction<F, T>(&self, f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            self.inner.transaction(f).await
        }

        async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            self.inner.transaction_serializable(f).await
        }
    }

    fn manager(repo: MockSoftwareRepository) -> SoftwareManager<MockedUow> {
        let uow = MockedUow {
            software: Arc::new(repo),
        };
        SoftwareManager::new(Arc::new(uow), ParticipantScope::Software)
    }

    fn request() -> NewSoftware {
        NewSoftware {
            name: "Inventory App".to_string(),
            city: "Pasto".to_string(),
            general_objective: "Control de inventario".to_string(),
            description: "Aplicación de inventario".to_string(),
            version: "1.0".to_string(),
            participants: vec![NewParticipant {
                name: "Ana".to_string(),
                role: "Dev".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_fails_before_any_write() {
        let mut repo = MockSoftwareRepository::new();
        repo.expect_exists_for_user()
            .with(eq(7), eq("Inventory App"))
            .times(1)
            .returning(|_, _| Ok(true));

        let err = manager(repo)
            .register_software(7, request())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), MSG_DUPLICATE_SOFTWARE);
    }

    #[tokio::test]
    async fn test_detail_of_foreign_software_is_absent() {
        let mut repo = MockSoftwareRepository::new();
        repo.expect_find_owned()
            .with(eq(3), eq(2))
            .returning(|_, _| Ok(None));

        let detail = manager(repo).get_software_detail(3, 2).await.unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_detail_of_owned_software() {
        let mut repo = MockSoftwareRepository::new();
        repo.expect_find_owned().returning(|id, user_id| {
            Ok(Some(Software {
                id,
                user_id,
                name: "Inventory App".to_string(),
                city: "Pasto".to_string(),
                general_objective: "x".to_string(),
                description: "y".to_string(),
                version: "1.0".to_string(),
                registered_at: Utc::now(),
            }))
        });

        let detail = manager(repo).get_software_detail(3, 1).await.unwrap();
        assert_eq!(detail.map(|s| s.user_id), Some(1));
    }

    #[tokio::test]
    async fn test_participants_of_foreign_software_not_found() {
        let mut repo = MockSoftwareRepository::new();
        repo.expect_find_owned().returning(|_, _| Ok(None));
        repo.expect_list_participants().never();

        let err = manager(repo).list_participants(3, 2).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_unique_index_rejection_is_duplicate_name() {
        let config = Config::new("sqlite::memory:", "unit-test-secret");
        let db = Database::connect(&config).await.unwrap();
        let owner = Persistence::new(db.get_connection())
            .users()
            .create(
                "ana".to_string(),
                "ana@example.com".to_string(),
                "hash".to_string(),
            )
            .await
            .unwrap();

        let storage = Arc::new(Persistence::new(db.get_connection()));
        let seeded = SoftwareManager::new(storage, ParticipantScope::Software)
            .register_software(owner.id, request())
            .await
            .unwrap();

        let mut stale = MockSoftwareRepository::new();
        stale
            .expect_exists_for_user()
            .times(1)
            .returning(|_, _| Ok(false));
        let uow = StaleCheckUow {
            inner: Persistence::new(db.get_connection()),
            software: Arc::new(stale),
        };

        let mut again = request();
        again.participants = vec![NewParticipant {
            name: "Zed".to_string(),
            role: "QA".to_string(),
        }];
        let err = SoftwareManager::new(Arc::new(uow), ParticipantScope::Software)
            .register_software(owner.id, again)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), MSG_DUPLICATE_SOFTWARE);

        let participants = ParticipantEntity::find()
            .all(db.connection())
            .await
            .unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, "Ana");
        assert_eq!(participants[0].software_id, seeded.id);
    }
}
