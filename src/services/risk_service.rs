//! Risk service - risk register and mitigation plans of a project.

use async_trait::async_trait;
use std::sync::Arc;

use super::container::parallel;
use super::software_service::owned_software;
use crate::domain::{NewRisk, NewRiskMitigation, RiskMitigation, RiskRecord, SoftwareRisk};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RiskService: Send + Sync {
    /// Register a risk with its ownership, classification, evaluation and
    /// controls in one transaction
    async fn register_risk(
        &self,
        software_id: i32,
        user_id: i32,
        request: NewRisk,
    ) -> AppResult<RiskRecord>;

    async fn list_risks(&self, software_id: i32, user_id: i32) -> AppResult<Vec<SoftwareRisk>>;

    /// A risk with all four components
    async fn get_risk(&self, software_id: i32, risk_id: i32, user_id: i32)
        -> AppResult<RiskRecord>;

    async fn delete_risk(&self, software_id: i32, risk_id: i32, user_id: i32) -> AppResult<()>;

    /// Record a mitigation plan. Missing evaluation and ownership ids default
    /// to the risk's own; code, description and zone default to the risk's
    /// current values.
    async fn add_mitigation(
        &self,
        software_id: i32,
        risk_id: i32,
        user_id: i32,
        request: NewRiskMitigation,
    ) -> AppResult<RiskMitigation>;

    async fn list_mitigations(
        &self,
        software_id: i32,
        risk_id: i32,
        user_id: i32,
    ) -> AppResult<Vec<RiskMitigation>>;
}

/// Resolve a component id named by a mitigation against the risk's own
/// component. An id from another risk is rejected.
fn resolve_component(
    requested: Option<i32>,
    actual: Option<i32>,
    label: &str,
) -> AppResult<Option<i32>> {
    match requested {
        None => Ok(actual),
        Some(id) if Some(id) == actual => Ok(Some(id)),
        Some(id) => Err(AppError::bad_request(format!(
            "{} {} no pertenece a este riesgo",
            label, id
        ))),
    }
}

/// Concrete implementation of RiskService using Unit of Work.
pub struct RiskManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RiskManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn owned_risk(
        &self,
        software_id: i32,
        risk_id: i32,
        user_id: i32,
    ) -> AppResult<SoftwareRisk> {
        let software = owned_software(self.uow.as_ref(), software_id, user_id).await?;
        self.uow
            .risks()
            .find_risk(software.id, risk_id)
            .await?
            .ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> RiskService for RiskManager<U> {
    async fn register_risk(
        &self,
        software_id: i32,
        user_id: i32,
        request: NewRisk,
    ) -> AppResult<RiskRecord> {
        let software = owned_software(self.uow.as_ref(), software_id, user_id).await?;

        let record = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.risks().create(software.id, request).await })
            })
            .await?;

        tracing::info!(software_id, risk_id = record.risk.id, "Risk registered");
        Ok(record)
    }

    async fn list_risks(&self, software_id: i32, user_id: i32) -> AppResult<Vec<SoftwareRisk>> {
        let software = owned_software(self.uow.as_ref(), software_id, user_id).await?;
        self.uow.risks().list_for_software(software.id).await
    }

    async fn get_risk(
        &self,
        software_id: i32,
        risk_id: i32,
        user_id: i32,
    ) -> AppResult<RiskRecord> {
        let risk = self.owned_risk(software_id, risk_id, user_id).await?;

        let repo = self.uow.risks();
        let (ownership, classification, evaluation, controls) = parallel::join4(
            repo.find_ownership(risk.id),
            repo.find_classification(risk.id),
            repo.find_evaluation(risk.id),
            repo.find_controls(risk.id),
        )
        .await?;

        match (ownership, classification, evaluation, controls) {
            (Some(ownership), Some(classification), Some(evaluation), Some(controls)) => {
                Ok(RiskRecord {
                    risk,
                    ownership,
                    classification,
                    evaluation,
                    controls,
                })
            }
            _ => Err(AppError::internal(format!(
                "Risk {} is missing a component",
                risk.id
            ))),
        }
    }

    async fn delete_risk(&self, software_id: i32, risk_id: i32, user_id: i32) -> AppResult<()> {
        let risk = self.owned_risk(software_id, risk_id, user_id).await?;
        if !self.uow.risks().delete(risk.id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(software_id, risk_id, "Risk deleted");
        Ok(())
    }

    async fn add_mitigation(
        &self,
        software_id: i32,
        risk_id: i32,
        user_id: i32,
        request: NewRiskMitigation,
    ) -> AppResult<RiskMitigation> {
        let risk = self.owned_risk(software_id, risk_id, user_id).await?;

        let mitigation = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.risks();
                    let evaluation = repo.find_evaluation(risk.id).await?;
                    let ownership = repo.find_ownership(risk.id).await?;

                    let evaluation_id = resolve_component(
                        request.evaluation_id,
                        evaluation.as_ref().map(|e| e.id),
                        "La evaluación",
                    )?;
                    let ownership_id = resolve_component(
                        request.ownership_id,
                        ownership.as_ref().map(|o| o.id),
                        "El responsable",
                    )?;

                    let mut request = request;
                    if request.risk_code.is_none() {
                        request.risk_code = Some(risk.risk_code.clone());
                    }
                    if request.risk_description.is_none() {
                        request.risk_description = risk.description.clone();
                    }
                    if request.risk_zone.is_none() {
                        request.risk_zone = evaluation.and_then(|e| e.risk_zone);
                    }

                    repo.add_mitigation(risk.id, evaluation_id, ownership_id, request)
                        .await
                })
            })
            .await?;

        tracing::info!(
            software_id,
            risk_id,
            mitigation_id = mitigation.id,
            "Mitigation recorded"
        );
        Ok(mitigation)
    }

    async fn list_mitigations(
        &self,
        software_id: i32,
        risk_id: i32,
        user_id: i32,
    ) -> AppResult<Vec<RiskMitigation>> {
        let risk = self.owned_risk(software_id, risk_id, user_id).await?;
        self.uow.risks().list_mitigations(risk.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_component_id_defaults_to_risk_component() {
        assert_eq!(resolve_component(None, Some(4), "x").unwrap(), Some(4));
        assert_eq!(resolve_component(None, None, "x").unwrap(), None);
    }

    #[test]
    fn test_matching_component_id_is_kept() {
        assert_eq!(resolve_component(Some(4), Some(4), "x").unwrap(), Some(4));
    }

    #[test]
    fn test_component_of_another_risk_is_rejected() {
        let err = resolve_component(Some(9), Some(4), "La evaluación").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(err.to_string().contains('9'));
    }
}
