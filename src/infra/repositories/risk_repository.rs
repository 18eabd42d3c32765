//! Risk register of a project.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::{
    risk_classification::{self, Entity as RiskClassificationEntity},
    risk_control::{self, Entity as RiskControlEntity},
    risk_evaluation::{self, Entity as RiskEvaluationEntity},
    risk_mitigation::{self, Entity as RiskMitigationEntity},
    risk_ownership::{self, Entity as RiskOwnershipEntity},
    software_risk::{self, Entity as SoftwareRiskEntity},
};
use crate::domain::{
    NewRisk, NewRiskMitigation, RiskClassification, RiskControl, RiskEvaluation, RiskMitigation,
    RiskOwnership, RiskRecord, SoftwareRisk,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Risk repository trait for dependency injection.
///
/// Component lookups take the risk id; each returns None when the row is missing.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RiskRepository: Send + Sync {
    /// Risks of a project, ordered by id
    async fn list_for_software(&self, software_id: i32) -> AppResult<Vec<SoftwareRisk>>;

    /// Find a risk by id, only if it belongs to the project
    async fn find_risk(&self, software_id: i32, risk_id: i32) -> AppResult<Option<SoftwareRisk>>;

    async fn find_ownership(&self, risk_id: i32) -> AppResult<Option<RiskOwnership>>;

    async fn find_classification(&self, risk_id: i32) -> AppResult<Option<RiskClassification>>;

    async fn find_evaluation(&self, risk_id: i32) -> AppResult<Option<RiskEvaluation>>;

    async fn find_controls(&self, risk_id: i32) -> AppResult<Option<RiskControl>>;

    /// Mitigation plans of a risk, oldest first
    async fn list_mitigations(&self, risk_id: i32) -> AppResult<Vec<RiskMitigation>>;

    /// Delete a risk with its components and mitigations. Returns false if
    /// nothing was deleted.
    async fn delete(&self, risk_id: i32) -> AppResult<bool>;
}

/// Concrete implementation of RiskRepository
pub struct RiskStore {
    db: DatabaseConnection,
}

impl RiskStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RiskRepository for RiskStore {
    async fn list_for_software(&self, software_id: i32) -> AppResult<Vec<SoftwareRisk>> {
        let models = SoftwareRiskEntity::find()
            .filter(software_risk::Column::SoftwareId.eq(software_id))
            .order_by_asc(software_risk::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(SoftwareRisk::from).collect())
    }

    async fn find_risk(&self, software_id: i32, risk_id: i32) -> AppResult<Option<SoftwareRisk>> {
        let result = SoftwareRiskEntity::find_by_id(risk_id)
            .filter(software_risk::Column::SoftwareId.eq(software_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(SoftwareRisk::from))
    }

    async fn find_ownership(&self, risk_id: i32) -> AppResult<Option<RiskOwnership>> {
        let result = RiskOwnershipEntity::find()
            .filter(risk_ownership::Column::RiskId.eq(risk_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RiskOwnership::from))
    }

    async fn find_classification(&self, risk_id: i32) -> AppResult<Option<RiskClassification>> {
        RiskClassificationEntity::find()
            .filter(risk_classification::Column::RiskId.eq(risk_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(RiskClassification::try_from)
            .transpose()
    }

    async fn find_evaluation(&self, risk_id: i32) -> AppResult<Option<RiskEvaluation>> {
        RiskEvaluationEntity::find()
            .filter(risk_evaluation::Column::RiskId.eq(risk_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(RiskEvaluation::try_from)
            .transpose()
    }

    async fn find_controls(&self, risk_id: i32) -> AppResult<Option<RiskControl>> {
        let result = RiskControlEntity::find()
            .filter(risk_control::Column::RiskId.eq(risk_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RiskControl::from))
    }

    async fn list_mitigations(&self, risk_id: i32) -> AppResult<Vec<RiskMitigation>> {
        let models = RiskMitigationEntity::find()
            .filter(risk_mitigation::Column::RiskId.eq(risk_id))
            .order_by_asc(risk_mitigation::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(RiskMitigation::try_from).collect()
    }

    async fn delete(&self, risk_id: i32) -> AppResult<bool> {
        let result = SoftwareRiskEntity::delete_by_id(risk_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

/// Transaction-aware risk repository.
pub struct TxRiskRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRiskRepository<'a> {
    /// Create new transaction-aware repository
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a risk together with its four components
    pub async fn create(&self, software_id: i32, request: NewRisk) -> AppResult<RiskRecord> {
        let risk = software_risk::ActiveModel {
            software_id: Set(software_id),
            risk_code: Set(request.risk_code),
            identified_at: Set(request.identified_at),
            title: Set(request.title),
            description: Set(request.description),
            causes: Set(request.causes),
            affects_critical_infrastructure: Set(request.affects_critical_infrastructure),
            process: Set(request.process),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(AppError::from)?;

        let ownership = risk_ownership::ActiveModel {
            risk_id: Set(risk.id),
            owner_name: Set(request.ownership.owner_name),
            owner_role: Set(request.ownership.owner_role),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(AppError::from)?;

        let classification = risk_classification::ActiveModel {
            risk_id: Set(risk.id),
            risk_type: Set(request.classification.risk_type.as_str().to_string()),
            confidentiality: Set(request.classification.confidentiality),
            integrity: Set(request.classification.integrity),
            availability: Set(request.classification.availability),
            impact_type: Set(request.classification.impact_type),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(AppError::from)?;

        let evaluation = risk_evaluation::ActiveModel {
            risk_id: Set(risk.id),
            likelihood: Set(request.evaluation.likelihood.level()),
            impact: Set(request.evaluation.impact.level()),
            risk_zone: Set(request.evaluation.risk_zone),
            acceptance: Set(request.evaluation.acceptance),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(AppError::from)?;

        let controls = request.controls;
        let controls = risk_control::ActiveModel {
            risk_id: Set(risk.id),
            control_type: Set(controls.control_type),
            has_mechanism: Set(controls.has_mechanism),
            has_manuals: Set(controls.has_manuals),
            control_effective: Set(controls.control_effective),
            responsible_defined: Set(controls.responsible_defined),
            control_frequency_adequate: Set(controls.control_frequency_adequate),
            control_rating: Set(controls.control_rating),
            preventive_controls_avg: Set(controls.preventive_controls_avg),
            reduce_likelihood_quadrants: Set(controls.reduce_likelihood_quadrants),
            corrective_controls_avg: Set(controls.corrective_controls_avg),
            reduce_impact_quadrants: Set(controls.reduce_impact_quadrants),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(AppError::from)?;

        Ok(RiskRecord {
            risk: SoftwareRisk::from(risk),
            ownership: RiskOwnership::from(ownership),
            classification: RiskClassification::try_from(classification)?,
            evaluation: RiskEvaluation::try_from(evaluation)?,
            controls: RiskControl::from(controls),
        })
    }

    /// Evaluation component of a risk
    pub async fn find_evaluation(&self, risk_id: i32) -> AppResult<Option<RiskEvaluation>> {
        RiskEvaluationEntity::find()
            .filter(risk_evaluation::Column::RiskId.eq(risk_id))
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .map(RiskEvaluation::try_from)
            .transpose()
    }

    /// Ownership component of a risk
    pub async fn find_ownership(&self, risk_id: i32) -> AppResult<Option<RiskOwnership>> {
        let result = RiskOwnershipEntity::find()
            .filter(risk_ownership::Column::RiskId.eq(risk_id))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RiskOwnership::from))
    }

    /// Insert a mitigation plan. The caller resolves ids and snapshot values.
    pub async fn add_mitigation(
        &self,
        risk_id: i32,
        evaluation_id: Option<i32>,
        ownership_id: Option<i32>,
        request: NewRiskMitigation,
    ) -> AppResult<RiskMitigation> {
        let active_model = risk_mitigation::ActiveModel {
            risk_id: Set(risk_id),
            evaluation_id: Set(evaluation_id),
            ownership_id: Set(ownership_id),
            risk_code: Set(request.risk_code),
            risk_description: Set(request.risk_description),
            risk_zone: Set(request.risk_zone),
            responsible: Set(request.responsible),
            phase: Set(request.phase),
            response_type: Set(request.response_type.as_str().to_string()),
            mitigation_plan: Set(request.mitigation_plan),
            registered_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        RiskMitigation::try_from(model)
    }
}
