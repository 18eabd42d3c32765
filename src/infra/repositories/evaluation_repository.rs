//! Quality evaluations with their detail and summary rows.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::{
    evaluation::{self, Entity as EvaluationEntity},
    evaluation_characteristic_summary::{self, Entity as CharacteristicSummaryEntity},
    evaluation_detail::{self, Entity as EvaluationDetailEntity},
};
use crate::domain::{
    Characteristic, CharacteristicSummary, Evaluation, EvaluationDetail, EvaluationReport,
    LatestEvaluation, NewCharacteristicSummary, Subcharacteristic,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Evaluation repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// Evaluations of a project, newest first
    async fn list_for_software(&self, software_id: i32) -> AppResult<Vec<Evaluation>>;

    /// Most recent evaluation of a project
    async fn latest_for_software(&self, software_id: i32) -> AppResult<Option<LatestEvaluation>>;

    /// Evaluation with its details and summaries, only if it belongs to the project
    async fn find_report(
        &self,
        software_id: i32,
        evaluation_id: i32,
    ) -> AppResult<Option<EvaluationReport>>;
}

/// Concrete implementation of EvaluationRepository
pub struct EvaluationStore {
    db: DatabaseConnection,
}

impl EvaluationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EvaluationRepository for EvaluationStore {
    async fn list_for_software(&self, software_id: i32) -> AppResult<Vec<Evaluation>> {
        let models = EvaluationEntity::find()
            .filter(evaluation::Column::SoftwareId.eq(software_id))
            .order_by_desc(evaluation::Column::Date)
            .order_by_desc(evaluation::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Evaluation::from).collect())
    }

    async fn latest_for_software(&self, software_id: i32) -> AppResult<Option<LatestEvaluation>> {
        let result = EvaluationEntity::find()
            .filter(evaluation::Column::SoftwareId.eq(software_id))
            .order_by_desc(evaluation::Column::Date)
            .order_by_desc(evaluation::Column::Id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LatestEvaluation::from))
    }

    async fn find_report(
        &self,
        software_id: i32,
        evaluation_id: i32,
    ) -> AppResult<Option<EvaluationReport>> {
        let Some(model) = EvaluationEntity::find_by_id(evaluation_id)
            .filter(evaluation::Column::SoftwareId.eq(software_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let details = model
            .find_related(EvaluationDetailEntity)
            .order_by_asc(evaluation_detail::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let summaries = model
            .find_related(CharacteristicSummaryEntity)
            .order_by_asc(evaluation_characteristic_summary::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Some(EvaluationReport {
            evaluation: Evaluation::from(model),
            details: details.into_iter().map(EvaluationDetail::from).collect(),
            characteristic_summaries: summaries
                .into_iter()
                .map(CharacteristicSummary::from)
                .collect(),
        }))
    }
}

/// Transaction-aware evaluation repository.
///
/// Detail and summary rows copy names, descriptions, max scores and
/// weights from the rubric rows handed in.
pub struct TxEvaluationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEvaluationRepository<'a> {
    /// Create new transaction-aware repository
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert the evaluation row
    pub async fn create(
        &self,
        software_id: i32,
        global_score_percentage: Option<f64>,
    ) -> AppResult<Evaluation> {
        let active_model = evaluation::ActiveModel {
            software_id: Set(software_id),
            date: Set(chrono::Utc::now()),
            global_score_percentage: Set(global_score_percentage),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Evaluation::from(model))
    }

    /// Insert a detail score for a subcharacteristic
    pub async fn add_detail(
        &self,
        evaluation_id: i32,
        subcharacteristic: &Subcharacteristic,
        score: i16,
        comment: Option<String>,
    ) -> AppResult<EvaluationDetail> {
        let active_model = evaluation_detail::ActiveModel {
            evaluation_id: Set(evaluation_id),
            subcharacteristic_id: Set(Some(subcharacteristic.id)),
            score: Set(score),
            comment: Set(comment),
            subcharacteristic_name: Set(subcharacteristic.name.clone()),
            subcharacteristic_description: Set(subcharacteristic.description.clone()),
            max_score: Set(subcharacteristic.max_score),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(EvaluationDetail::from(model))
    }

    /// Insert the rollup of a characteristic
    pub async fn add_summary(
        &self,
        evaluation_id: i32,
        characteristic: &Characteristic,
        summary: &NewCharacteristicSummary,
    ) -> AppResult<CharacteristicSummary> {
        let active_model = evaluation_characteristic_summary::ActiveModel {
            evaluation_id: Set(evaluation_id),
            characteristic_id: Set(Some(characteristic.id)),
            value: Set(summary.value),
            max_value: Set(summary.max_value),
            result_percentage: Set(summary.result_percentage),
            weighted_percentage: Set(summary.weighted_percentage),
            characteristic_name: Set(characteristic.name.clone()),
            weight_percentage: Set(characteristic.weight_percentage),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(CharacteristicSummary::from(model))
    }
}
