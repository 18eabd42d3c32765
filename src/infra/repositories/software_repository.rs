//! Software projects and their participants.
//!
//! Every read that takes a user id is scoped to that owner; a project owned
//! by someone else is indistinguishable from a missing one.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::{
    software::{self, Entity as SoftwareEntity},
    software_participant::{self, Entity as ParticipantEntity},
};
use crate::domain::{NewSoftware, Participant, Software};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Software repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SoftwareRepository: Send + Sync {
    /// Whether the user already has a project with this name
    async fn exists_for_user(&self, user_id: i32, name: &str) -> AppResult<bool>;

    /// Find a project by id, only if the user owns it
    async fn find_owned(&self, id: i32, user_id: i32) -> AppResult<Option<Software>>;

    /// All projects of a user, oldest first
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Software>>;

    /// Participants of a project
    async fn list_participants(&self, software_id: i32) -> AppResult<Vec<Participant>>;

    /// Delete a project and everything under it. Returns false if nothing was deleted.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of SoftwareRepository
pub struct SoftwareStore {
    db: DatabaseConnection,
}

impl SoftwareStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SoftwareRepository for SoftwareStore {
    async fn exists_for_user(&self, user_id: i32, name: &str) -> AppResult<bool> {
        let count = SoftwareEntity::find()
            .filter(software::Column::UserId.eq(user_id))
            .filter(software::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn find_owned(&self, id: i32, user_id: i32) -> AppResult<Option<Software>> {
        let result = SoftwareEntity::find_by_id(id)
            .filter(software::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Software::from))
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Software>> {
        let models = SoftwareEntity::find()
            .filter(software::Column::UserId.eq(user_id))
            .order_by_asc(software::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Software::from).collect())
    }

    async fn list_participants(&self, software_id: i32) -> AppResult<Vec<Participant>> {
        let models = ParticipantEntity::find()
            .filter(software_participant::Column::SoftwareId.eq(software_id))
            .order_by_asc(software_participant::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Participant::from).collect())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = SoftwareEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

/// Transaction-aware software repository.
///
/// Executes all operations within the provided transaction.
pub struct TxSoftwareRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxSoftwareRepository<'a> {
    /// Create new transaction-aware repository
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert the project row and return it with its generated id
    pub async fn create(&self, user_id: i32, request: &NewSoftware) -> AppResult<Software> {
        let active_model = software::ActiveModel {
            user_id: Set(user_id),
            name: Set(request.name.clone()),
            city: Set(request.city.clone()),
            general_objective: Set(request.general_objective.clone()),
            description: Set(request.description.clone()),
            version: Set(request.version.clone()),
            registered_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Software::from(model))
    }

    /// Whether a participant with this name exists. With `software_id` the
    /// lookup is limited to that project, otherwise it spans every project.
    pub async fn participant_exists(
        &self,
        name: &str,
        software_id: Option<i32>,
    ) -> AppResult<bool> {
        let mut query =
            ParticipantEntity::find().filter(software_participant::Column::Name.eq(name));
        if let Some(software_id) = software_id {
            query = query.filter(software_participant::Column::SoftwareId.eq(software_id));
        }

        let count = query.count(self.txn).await?;
        Ok(count > 0)
    }

    /// Attach a participant to a project
    pub async fn add_participant(
        &self,
        software_id: i32,
        name: String,
        role: String,
    ) -> AppResult<Participant> {
        let active_model = software_participant::ActiveModel {
            software_id: Set(software_id),
            name: Set(name),
            role: Set(role),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Participant::from(model))
    }
}
