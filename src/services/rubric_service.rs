//! Rubric service - characteristics and subcharacteristics.
//!
//! Callers are expected to have checked the admin role before mutating.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CharacteristicTree, NewCharacteristic, NewSubcharacteristic, Subcharacteristic};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait RubricService: Send + Sync {
    /// Full rubric, characteristics with their subcharacteristics
    async fn list_characteristics(&self) -> AppResult<Vec<CharacteristicTree>>;

    /// Create a characteristic and its initial subcharacteristics in one transaction
    async fn create_characteristic(&self, request: NewCharacteristic)
        -> AppResult<CharacteristicTree>;

    /// Add a subcharacteristic to an existing characteristic
    async fn add_subcharacteristic(
        &self,
        characteristic_id: i32,
        request: NewSubcharacteristic,
    ) -> AppResult<Subcharacteristic>;

    /// Delete a characteristic. Past evaluations keep their copied values.
    async fn delete_characteristic(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of RubricService using Unit of Work.
pub struct RubricManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RubricManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RubricService for RubricManager<U> {
    async fn list_characteristics(&self) -> AppResult<Vec<CharacteristicTree>> {
        self.uow.rubric().list_tree().await
    }

    async fn create_characteristic(
        &self,
        request: NewCharacteristic,
    ) -> AppResult<CharacteristicTree> {
        let tree = with_transaction!(self.uow, |ctx| {
            let repo = ctx.rubric();
            let characteristic = repo.create_characteristic(&request).await?;

            let mut subcharacteristics = Vec::with_capacity(request.subcharacteristics.len());
            for sub in &request.subcharacteristics {
                subcharacteristics.push(repo.add_subcharacteristic(characteristic.id, sub).await?);
            }

            Ok(CharacteristicTree {
                characteristic,
                subcharacteristics,
            })
        })?;

        tracing::info!(
            characteristic_id = tree.characteristic.id,
            "Characteristic created"
        );
        Ok(tree)
    }

    async fn add_subcharacteristic(
        &self,
        characteristic_id: i32,
        request: NewSubcharacteristic,
    ) -> AppResult<Subcharacteristic> {
        if self
            .uow
            .rubric()
            .find_characteristic(characteristic_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound);
        }

        self.uow
            .rubric()
            .add_subcharacteristic(characteristic_id, request)
            .await
    }

    async fn delete_characteristic(&self, id: i32) -> AppResult<()> {
        if !self.uow.rubric().delete_characteristic(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(characteristic_id = id, "Characteristic deleted");
        Ok(())
    }
}
