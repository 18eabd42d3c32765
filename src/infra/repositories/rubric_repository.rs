//! Evaluation rubric: characteristics and subcharacteristics.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::{
    quality_characteristic::{self, Entity as CharacteristicEntity},
    subcharacteristic::{self, Entity as SubcharacteristicEntity},
};
use crate::domain::{
    Characteristic, CharacteristicTree, NewCharacteristic, NewSubcharacteristic, Subcharacteristic,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Rubric repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RubricRepository: Send + Sync {
    /// Every characteristic with its subcharacteristics, both ordered by id
    async fn list_tree(&self) -> AppResult<Vec<CharacteristicTree>>;

    /// Find characteristic by ID
    async fn find_characteristic(&self, id: i32) -> AppResult<Option<Characteristic>>;

    /// Add a subcharacteristic under an existing characteristic
    async fn add_subcharacteristic(
        &self,
        characteristic_id: i32,
        request: NewSubcharacteristic,
    ) -> AppResult<Subcharacteristic>;

    /// Delete a characteristic and its subcharacteristics. Returns false if
    /// nothing was deleted.
    async fn delete_characteristic(&self, id: i32) -> AppResult<bool>;
}

async fn insert_subcharacteristic<C: ConnectionTrait>(
    conn: &C,
    characteristic_id: i32,
    request: &NewSubcharacteristic,
) -> AppResult<Subcharacteristic> {
    let active_model = subcharacteristic::ActiveModel {
        characteristic_id: Set(characteristic_id),
        name: Set(request.name.clone()),
        description: Set(request.description.clone()),
        max_score: Set(request.max_score),
        ..Default::default()
    };

    let model = active_model.insert(conn).await.map_err(AppError::from)?;
    Ok(Subcharacteristic::from(model))
}

/// Concrete implementation of RubricRepository
pub struct RubricStore {
    db: DatabaseConnection,
}

impl RubricStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RubricRepository for RubricStore {
    async fn list_tree(&self) -> AppResult<Vec<CharacteristicTree>> {
        let rows = CharacteristicEntity::find()
            .find_with_related(SubcharacteristicEntity)
            .order_by_asc(quality_characteristic::Column::Id)
            .order_by_asc(subcharacteristic::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(characteristic, subcharacteristics)| CharacteristicTree {
                characteristic: Characteristic::from(characteristic),
                subcharacteristics: subcharacteristics
                    .into_iter()
                    .map(Subcharacteristic::from)
                    .collect(),
            })
            .collect())
    }

    async fn find_characteristic(&self, id: i32) -> AppResult<Option<Characteristic>> {
        let result = CharacteristicEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Characteristic::from))
    }

    async fn add_subcharacteristic(
        &self,
        characteristic_id: i32,
        request: NewSubcharacteristic,
    ) -> AppResult<Subcharacteristic> {
        insert_subcharacteristic(&self.db, characteristic_id, &request).await
    }

    async fn delete_characteristic(&self, id: i32) -> AppResult<bool> {
        let result = CharacteristicEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

/// Transaction-aware rubric repository.
pub struct TxRubricRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRubricRepository<'a> {
    /// Create new transaction-aware repository
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a characteristic row (subcharacteristics are added separately)
    pub async fn create_characteristic(
        &self,
        request: &NewCharacteristic,
    ) -> AppResult<Characteristic> {
        let active_model = quality_characteristic::ActiveModel {
            name: Set(request.name.clone()),
            description: Set(request.description.clone()),
            weight_percentage: Set(request.weight_percentage),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Characteristic::from(model))
    }

    /// Add a subcharacteristic under a characteristic
    pub async fn add_subcharacteristic(
        &self,
        characteristic_id: i32,
        request: &NewSubcharacteristic,
    ) -> AppResult<Subcharacteristic> {
        insert_subcharacteristic(self.txn, characteristic_id, request).await
    }

    /// Load the subcharacteristics with the given ids; unknown ids are omitted
    pub async fn find_subcharacteristics(&self, ids: &[i32]) -> AppResult<Vec<Subcharacteristic>> {
        let models = SubcharacteristicEntity::find()
            .filter(subcharacteristic::Column::Id.is_in(ids.iter().copied()))
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Subcharacteristic::from).collect())
    }

    /// Load the characteristics with the given ids; unknown ids are omitted
    pub async fn find_characteristics(&self, ids: &[i32]) -> AppResult<Vec<Characteristic>> {
        let models = CharacteristicEntity::find()
            .filter(quality_characteristic::Column::Id.is_in(ids.iter().copied()))
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Characteristic::from).collect())
    }
}
